//! Member descriptor.

use crate::domain::{MemberId, MemberType};

/// How a member is exposed on its type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Conventional accessor; compared by default.
    #[default]
    Property,
    /// Plain data field; compared only when field comparison is enabled.
    Field,
}

/// Describes one member of a comparable type at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Declared member name.
    pub name: &'static str,
    /// Declared type of the member.
    pub member_type: MemberType,
    /// Property or field.
    pub kind: MemberKind,
    /// Whether the member is publicly visible.
    pub is_public: bool,
}

impl MemberDescriptor {
    /// Creates a non-public property descriptor.
    pub fn new(name: &'static str, member_type: MemberType) -> Self {
        MemberDescriptor {
            name,
            member_type,
            kind: MemberKind::Property,
            is_public: false,
        }
    }

    /// Marks the member as public.
    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Sets the member kind.
    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the member identity.
    pub fn id(&self) -> MemberId {
        MemberId::new(self.name)
    }

    pub fn is_field(&self) -> bool {
        self.kind == MemberKind::Field
    }
}
