//! Sequence-valued member types.

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

/// Types that hold a sequence of elements and may be configured as collections.
pub trait Sequence {
    /// The element type.
    type Element;
}

impl<E> Sequence for Vec<E> {
    type Element = E;
}

impl<E> Sequence for VecDeque<E> {
    type Element = E;
}

impl<E> Sequence for LinkedList<E> {
    type Element = E;
}

impl<E> Sequence for Box<[E]> {
    type Element = E;
}

impl<E, const N: usize> Sequence for [E; N] {
    type Element = E;
}

impl<E> Sequence for BTreeSet<E> {
    type Element = E;
}

impl<E, S> Sequence for HashSet<E, S> {
    type Element = E;
}
