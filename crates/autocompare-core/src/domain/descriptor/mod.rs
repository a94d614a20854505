//! Runtime descriptors for comparable types.

mod member;
mod type_descriptor;


pub use member::{MemberDescriptor, MemberKind};
pub use type_descriptor::TypeDescriptor;
