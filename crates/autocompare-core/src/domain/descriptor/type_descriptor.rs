//! Type descriptor.

use std::any::TypeId;
use std::fmt;

use super::MemberDescriptor;

/// Describes a comparable type at runtime.
#[derive(Clone)]
pub struct TypeDescriptor {
    /// Name of the type.
    pub type_name: &'static str,
    /// TypeId of the type.
    pub type_id: TypeId,
    /// Members in declaration order.
    pub members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor with no members.
    pub fn new(type_name: &'static str, type_id: TypeId) -> Self {
        TypeDescriptor {
            type_name,
            type_id,
            members: Vec::new(),
        }
    }

    /// Adds a member descriptor.
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Returns all members in declaration order.
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Finds a member by name.
    pub fn find_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Returns true if a member with this name is declared.
    pub fn has_member(&self, name: &str) -> bool {
        self.find_member(name).is_some()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("members", &self.members.len())
            .finish()
    }
}
