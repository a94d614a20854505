//! AutoCompare - declarative comparer configuration in Rust
//!
//! Derive `Comparable`, declare per type how members are compared, then
//! compile the configuration with a `ComparerEngine`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use autocompare::prelude::*;
//!
//! #[derive(Comparable)]
//! pub struct Article {
//!     pub title: String,
//!     pub tags: Vec<String>,
//!     pub revision: u32,
//! }
//!
//! let engine = Arc::new(PlanEngine::new());
//! let mut registry = ConfigurationRegistry::new(Arc::clone(&engine));
//!
//! let mut builder = registry.configure::<Article>().unwrap();
//! builder
//!     .ignore_member(member!(Article, revision))
//!     .unwrap()
//!     .configure_collection(member!(Article, tags), |tags| {
//!         tags.ignore_order();
//!     })
//!     .unwrap();
//!
//! let plan = builder.compile_sync().unwrap();
//! assert_eq!(plan.member_names(), vec!["title", "tags"]);
//! ```

// Derive macro (shares its name with the trait, like serde)
pub use autocompare_macros::Comparable;

pub use autocompare_core::{
    member, Comparable, DescriptorResolver, Member, MemberDescriptor, MemberId, MemberKind,
    MemberResolver, MemberType, ResolveError, Sequence, TypeDescriptor,
};

pub use autocompare_config::{
    CollectionConfiguration, CollectionRule, CompileError, CompileSettings, ComparerEngine,
    ComparisonPlan, ConfigError, ConfigurationBuilder, ConfigurationRegistry, CustomComparer,
    ElementComparison, MemberConfiguration, MemberRule, PlanEngine, PlannedMember, ScalarRule,
    TypeConfiguration,
};

#[cfg(feature = "logging")]
pub mod logging;

/// Internal types for macro-generated code. Do not use directly.
#[doc(hidden)]
pub mod __internal {
    pub use autocompare_core::{
        Comparable, MemberDescriptor, MemberKind, MemberType, TypeDescriptor,
    };
}

pub mod prelude {
    pub use super::{member, Comparable};
    pub use super::{
        ComparerEngine, ConfigError, ConfigurationRegistry, MemberRule, PlanEngine,
        TypeConfiguration,
    };
}
