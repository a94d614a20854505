//! Domain model types: member identities, selectors and descriptors.

pub mod descriptor;
mod member;
mod resolver;
mod sequence;
mod traits;


pub use descriptor::{MemberDescriptor, MemberKind, TypeDescriptor};
pub use member::{Member, MemberId, MemberType};
pub use resolver::{DescriptorResolver, MemberResolver};
pub use sequence::Sequence;
pub use traits::Comparable;
