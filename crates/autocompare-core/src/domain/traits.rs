//! Core domain traits.

use super::TypeDescriptor;

/// Marker trait for types that can be configured and compared.
///
/// Usually implemented with `#[derive(Comparable)]`, which lists every named
/// field of the struct in the returned descriptor.
///
/// # Example
///
/// ```
/// use autocompare_core::{Comparable, MemberDescriptor, MemberType, TypeDescriptor};
/// use std::any::TypeId;
///
/// struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// impl Comparable for Point {
///     fn type_descriptor() -> TypeDescriptor {
///         TypeDescriptor::new("Point", TypeId::of::<Point>())
///             .with_member(MemberDescriptor::new("x", MemberType::of::<i32>()).public())
///             .with_member(MemberDescriptor::new("y", MemberType::of::<i32>()).public())
///     }
/// }
///
/// assert_eq!(Point::type_descriptor().members().len(), 2);
/// ```
pub trait Comparable: 'static {
    /// Returns the runtime description of this type's members.
    fn type_descriptor() -> TypeDescriptor;
}
