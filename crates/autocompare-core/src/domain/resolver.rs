//! Resolution of member selectors to member identities.

use std::marker::PhantomData;

use super::{Comparable, Member, MemberId, TypeDescriptor};
use crate::error::ResolveError;

/// Resolves member selectors of `T` to stable member identities.
pub trait MemberResolver<T> {
    /// Resolves a member by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the name does not denote a direct member of `T`.
    fn resolve_name(&self, name: &str) -> Result<MemberId, ResolveError>;

    /// Resolves a typed selector.
    fn resolve<M>(&self, member: &Member<T, M>) -> Result<MemberId, ResolveError>
    where
        Self: Sized,
    {
        self.resolve_name(member.name())
    }
}

/// Resolver backed by the type's [`TypeDescriptor`].
///
/// Every identity it returns borrows its name from the descriptor, so
/// identities are stable for the life of the process.
pub struct DescriptorResolver<T> {
    descriptor: TypeDescriptor,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Comparable> DescriptorResolver<T> {
    pub fn new() -> Self {
        Self::from_descriptor(T::type_descriptor())
    }
}

impl<T> DescriptorResolver<T> {
    /// Creates a resolver over an explicit descriptor.
    pub fn from_descriptor(descriptor: TypeDescriptor) -> Self {
        DescriptorResolver {
            descriptor,
            _phantom: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}

impl<T: Comparable> Default for DescriptorResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemberResolver<T> for DescriptorResolver<T> {
    fn resolve_name(&self, name: &str) -> Result<MemberId, ResolveError> {
        let name = name.trim();
        if name.contains('.') || name.contains("::") {
            return Err(ResolveError::NotDirect {
                type_name: self.descriptor.type_name,
                expression: name.to_string(),
            });
        }

        self.descriptor
            .find_member(name)
            .map(|m| m.id())
            .ok_or_else(|| ResolveError::NotAMember {
                type_name: self.descriptor.type_name,
                expression: name.to_string(),
            })
    }
}
