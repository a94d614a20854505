//! Error types for AutoCompare core

use thiserror::Error;

/// Failure to resolve a member selector to a declared member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The selector does not name a member declared on the type.
    #[error("`{expression}` is not a member of {type_name}")]
    NotAMember {
        type_name: &'static str,
        expression: String,
    },

    /// The selector reaches through another member instead of naming one directly.
    #[error("`{expression}` is not a direct member access on {type_name}")]
    NotDirect {
        type_name: &'static str,
        expression: String,
    },
}

impl ResolveError {
    /// Returns the offending selector text.
    pub fn expression(&self) -> &str {
        match self {
            ResolveError::NotAMember { expression, .. } => expression,
            ResolveError::NotDirect { expression, .. } => expression,
        }
    }
}
