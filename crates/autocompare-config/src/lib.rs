//! Comparer configuration for AutoCompare.
//!
//! Declare per type which members to skip, which member types to ignore
//! everywhere, how collection members are compared and which members use
//! custom equality, then hand the frozen configuration to a
//! [`ComparerEngine`] to compile.
//!
//! # Lifecycle
//!
//! 1. Create one [`ConfigurationRegistry`] at startup.
//! 2. For each type, call [`ConfigurationRegistry::configure`] and register rules.
//! 3. Compile with [`ConfigurationBuilder::compile_sync`] (errors propagate) or
//!    [`ConfigurationBuilder::compile_async`] (fire-and-forget warm-up).
//!
//! Compiling freezes the type's configuration. Registering more rules for a
//! frozen type fails with [`ConfigError::AlreadyCompiled`].

mod builder;
mod compile;
mod engine;
mod error;
mod plan;
mod registry;
mod rule;
mod settings;
mod type_config;

#[cfg(test)]
mod tests;

pub use builder::ConfigurationBuilder;
pub use engine::ComparerEngine;
pub use error::{CompileError, ConfigError};
pub use plan::{ComparisonPlan, PlanEngine, PlannedMember};
pub use registry::ConfigurationRegistry;
pub use rule::{
    CollectionConfiguration, CollectionRule, CustomComparer, ElementComparison,
    MemberConfiguration, MemberRule, ScalarRule,
};
pub use settings::CompileSettings;
pub use type_config::TypeConfiguration;
