//! AutoCompare Core - Core types and traits for comparer configuration
//!
//! This crate provides the fundamental abstractions for AutoCompare:
//! - Member identities and statically typed member selectors
//! - Descriptor types for runtime member metadata
//! - Member resolution against a type's declared members

pub mod domain;
pub mod error;

pub use domain::{
    Comparable, DescriptorResolver, Member, MemberDescriptor, MemberId, MemberKind,
    MemberResolver, MemberType, Sequence, TypeDescriptor,
};
pub use error::ResolveError;
