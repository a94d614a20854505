//! Error types for comparer configuration.

use std::error::Error as StdError;

use autocompare_core::{MemberId, ResolveError};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A member was configured a second time for the same type.
    #[error("member `{member}` of {type_name} is already configured")]
    DuplicateMember {
        type_name: &'static str,
        member: MemberId,
    },

    /// A member selector did not resolve to a declared member.
    #[error(transparent)]
    Resolution(#[from] ResolveError),

    /// Rules were registered for a type whose configuration is frozen.
    #[error("{type_name} has already been compiled; its configuration is frozen")]
    AlreadyCompiled { type_name: &'static str },

    /// The engine failed to compile a comparer.
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Opaque failure reported by a [`ComparerEngine`](crate::ComparerEngine).
#[derive(Debug, Error)]
#[error("failed to compile comparer for {type_name}: {source}")]
pub struct CompileError {
    type_name: &'static str,
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl CompileError {
    pub fn new(
        type_name: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        CompileError {
            type_name,
            source: source.into(),
        }
    }

    /// Name of the type whose compilation failed.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
