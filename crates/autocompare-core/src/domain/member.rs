//! Member identities and typed member selectors.

use std::any::{type_name, TypeId};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable, type-scoped key naming one member of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(&'static str);

impl MemberId {
    /// Creates a member id from a declared member name.
    pub const fn new(name: &'static str) -> Self {
        MemberId(name)
    }

    /// Returns the member name.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Borrow<str> for MemberId {
    fn borrow(&self) -> &str {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The declared type of a member.
///
/// Equality, ordering and hashing use the `TypeId` only; the name is kept
/// for diagnostics.
#[derive(Clone, Copy)]
pub struct MemberType {
    id: TypeId,
    name: &'static str,
}

impl MemberType {
    /// Returns the member type for `M`.
    pub fn of<M: ?Sized + 'static>() -> Self {
        MemberType {
            id: TypeId::of::<M>(),
            name: type_name::<M>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for MemberType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MemberType {}

impl Hash for MemberType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for MemberType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemberType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Statically typed selector for member `M` of type `T`.
///
/// Build it with [`member!`](crate::member), which takes the name from the
/// field token at compile time and type-checks the access.
pub struct Member<T, M> {
    name: &'static str,
    accessor: for<'a> fn(&'a T) -> &'a M,
}

impl<T, M> Member<T, M> {
    /// Creates a selector from a member name and its accessor.
    pub fn new(name: &'static str, accessor: for<'a> fn(&'a T) -> &'a M) -> Self {
        Member { name, accessor }
    }

    /// Returns the selected member name as written at the call site.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the selected member from `value`.
    pub fn get<'a>(&self, value: &'a T) -> &'a M {
        (self.accessor)(value)
    }
}

impl<T, M> Clone for Member<T, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, M> Copy for Member<T, M> {}

impl<T, M> fmt::Debug for Member<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("owner", &type_name::<T>())
            .field("name", &self.name)
            .field("member_type", &type_name::<M>())
            .finish()
    }
}

/// Builds a [`Member`] selector for a named field.
///
/// ```
/// use autocompare_core::member;
///
/// struct Person {
///     name: String,
/// }
///
/// let selector = member!(Person, name);
/// let person = Person { name: "Ada".to_string() };
/// assert_eq!(selector.name(), "name");
/// assert_eq!(selector.get(&person), "Ada");
/// ```
#[macro_export]
macro_rules! member {
    ($ty:ty, $field:ident) => {
        $crate::Member::<$ty, _>::new(::core::stringify!($field), |value: &$ty| &value.$field)
    };
}
