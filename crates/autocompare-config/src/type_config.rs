//! Per-type comparer configuration.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};

use autocompare_core::{MemberDescriptor, MemberId, MemberKind, MemberType, TypeDescriptor};

use crate::error::ConfigError;
use crate::rule::MemberRule;

/// The complete set of rules and flags governing how one type is compared.
///
/// Engines receive it frozen behind an `Arc`; the ignored types it carries
/// are the registry-wide set as it stood when the configuration was frozen.
#[derive(Debug, Clone)]
pub struct TypeConfiguration {
    descriptor: TypeDescriptor,
    member_rules: HashMap<MemberId, MemberRule>,
    ignored_types: BTreeSet<MemberType>,
    compare_fields: bool,
}

impl TypeConfiguration {
    pub(crate) fn new(descriptor: TypeDescriptor, compare_fields: bool) -> Self {
        TypeConfiguration {
            descriptor,
            member_rules: HashMap::new(),
            ignored_types: BTreeSet::new(),
            compare_fields,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.descriptor.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.descriptor.type_id
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Whether public fields are compared in addition to properties.
    pub fn compare_fields(&self) -> bool {
        self.compare_fields
    }

    /// Member types excluded wherever they appear.
    pub fn ignored_types(&self) -> &BTreeSet<MemberType> {
        &self.ignored_types
    }

    pub fn is_type_ignored(&self, member_type: MemberType) -> bool {
        self.ignored_types.contains(&member_type)
    }

    /// Returns the rule for a member, or [`MemberRule::Default`] when none was registered.
    ///
    /// Unknown names are not an error.
    pub fn get_member_rule(&self, member: &str) -> &MemberRule {
        self.member_rules
            .get(member)
            .unwrap_or(MemberRule::default_ref())
    }

    pub fn has_rule(&self, member: &str) -> bool {
        self.member_rules.contains_key(member)
    }

    /// Iterates over explicitly registered rules, in no particular order.
    pub fn member_rules(&self) -> impl Iterator<Item = (MemberId, &MemberRule)> {
        self.member_rules.iter().map(|(id, rule)| (*id, rule))
    }

    pub fn rule_count(&self) -> usize {
        self.member_rules.len()
    }

    /// Returns true if the engine should compare this member.
    ///
    /// A member is compared when it is public, is a property (or field
    /// comparison is enabled), its type is not ignored and its rule does not
    /// ignore it.
    pub fn is_compared(&self, member: &MemberDescriptor) -> bool {
        if !member.is_public {
            return false;
        }
        if member.kind == MemberKind::Field && !self.compare_fields {
            return false;
        }
        if self.is_type_ignored(member.member_type) {
            return false;
        }
        !self.get_member_rule(member.name).is_ignored()
    }

    /// Members the engine should compare, in declaration order.
    pub fn compared_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.descriptor
            .members()
            .iter()
            .filter(move |member| self.is_compared(member))
    }

    pub(crate) fn set_compare_fields(&mut self) {
        self.compare_fields = true;
    }

    pub(crate) fn insert_rule(&mut self, member: MemberId, rule: MemberRule) -> Result<(), ConfigError> {
        if self.member_rules.contains_key(&member) {
            return Err(ConfigError::DuplicateMember {
                type_name: self.type_name(),
                member,
            });
        }
        self.member_rules.insert(member, rule);
        Ok(())
    }

    pub(crate) fn with_ignored_types(mut self, ignored_types: BTreeSet<MemberType>) -> Self {
        self.ignored_types = ignored_types;
        self
    }
}
