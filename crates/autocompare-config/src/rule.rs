//! Member and collection rules.
//!
//! Rules are stored type-erased in a [`TypeConfiguration`](crate::TypeConfiguration).
//! [`MemberConfiguration`] and [`CollectionConfiguration`] are the typed
//! builders handed to registration callbacks.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use autocompare_core::MemberType;

type Predicate<V> = dyn Fn(&V, &V) -> bool + Send + Sync;

static DEFAULT_RULE: MemberRule = MemberRule::Default;

/// Type-erased binary predicate over values of one member or element type.
///
/// The engine recovers the typed closure with [`CustomComparer::downcast`].
#[derive(Clone)]
pub struct CustomComparer {
    value_type: MemberType,
    predicate: Arc<dyn Any + Send + Sync>,
}

impl CustomComparer {
    pub fn new<V, F>(predicate: F) -> Self
    where
        V: 'static,
        F: Fn(&V, &V) -> bool + Send + Sync + 'static,
    {
        let boxed: Box<Predicate<V>> = Box::new(predicate);
        CustomComparer {
            value_type: MemberType::of::<V>(),
            predicate: Arc::new(boxed),
        }
    }

    /// Type the predicate accepts.
    pub fn value_type(&self) -> MemberType {
        self.value_type
    }

    /// Returns the typed predicate, or `None` if `V` is not the value type.
    pub fn downcast<V: 'static>(&self) -> Option<&Predicate<V>> {
        self.predicate
            .downcast_ref::<Box<Predicate<V>>>()
            .map(|boxed| boxed.as_ref())
    }

    /// Applies the predicate, or returns `None` on a type mismatch.
    pub fn test<V: 'static>(&self, left: &V, right: &V) -> Option<bool> {
        self.downcast::<V>().map(|predicate| predicate(left, right))
    }
}

impl fmt::Debug for CustomComparer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomComparer")
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

/// Rule for a scalar member.
#[derive(Debug, Clone, Default)]
pub struct ScalarRule {
    /// Member is excluded from comparison.
    pub ignored: bool,
    /// Equality override for the member's values.
    pub comparer: Option<CustomComparer>,
}

/// How elements of a collection member are compared.
#[derive(Debug, Clone, Default)]
pub enum ElementComparison {
    /// Elements are compared member by member.
    #[default]
    Structural,
    /// Elements are paired when the predicate holds, then compared structurally.
    Keyed(CustomComparer),
    /// Elements are equal when the predicate holds.
    Custom(CustomComparer),
}

/// Rule for a sequence-valued member.
#[derive(Debug, Clone)]
pub struct CollectionRule {
    /// Member is excluded from comparison.
    pub ignored: bool,
    /// Element order is significant.
    pub ordered: bool,
    pub element: ElementComparison,
    /// Declared element type.
    pub element_type: MemberType,
}

impl CollectionRule {
    pub fn new(element_type: MemberType) -> Self {
        CollectionRule {
            ignored: false,
            ordered: true,
            element: ElementComparison::Structural,
            element_type,
        }
    }
}

/// Configuration decision for one member.
///
/// A member holds at most one rule; [`MemberRule::Default`] stands for
/// "no explicit rule".
#[derive(Debug, Clone, Default)]
pub enum MemberRule {
    #[default]
    Default,
    Scalar(ScalarRule),
    Collection(CollectionRule),
}

impl MemberRule {
    pub(crate) fn default_ref() -> &'static MemberRule {
        &DEFAULT_RULE
    }

    /// Returns true if the member is excluded from comparison.
    pub fn is_ignored(&self) -> bool {
        match self {
            MemberRule::Default => false,
            MemberRule::Scalar(rule) => rule.ignored,
            MemberRule::Collection(rule) => rule.ignored,
        }
    }

    /// Returns true if the rule changes nothing about the engine's default strategy.
    pub fn is_default(&self) -> bool {
        match self {
            MemberRule::Default => true,
            MemberRule::Scalar(rule) => !rule.ignored && rule.comparer.is_none(),
            MemberRule::Collection(_) => false,
        }
    }

    /// Custom equality for a scalar member, if any.
    pub fn comparer(&self) -> Option<&CustomComparer> {
        match self {
            MemberRule::Scalar(rule) => rule.comparer.as_ref(),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionRule> {
        match self {
            MemberRule::Collection(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, MemberRule::Collection(_))
    }
}

/// Typed builder for a scalar member rule.
pub struct MemberConfiguration<M> {
    rule: ScalarRule,
    _phantom: PhantomData<fn(&M)>,
}

impl<M: 'static> MemberConfiguration<M> {
    pub(crate) fn new() -> Self {
        MemberConfiguration {
            rule: ScalarRule::default(),
            _phantom: PhantomData,
        }
    }

    /// Excludes the member from comparison.
    pub fn ignore(&mut self) -> &mut Self {
        self.rule.ignored = true;
        self
    }

    /// Compares the member with `predicate` instead of the default strategy.
    pub fn compare_with<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&M, &M) -> bool + Send + Sync + 'static,
    {
        self.rule.comparer = Some(CustomComparer::new::<M, F>(predicate));
        self
    }

    pub(crate) fn into_rule(self) -> MemberRule {
        MemberRule::Scalar(self.rule)
    }
}

/// Typed builder for a collection member rule over elements `E`.
pub struct CollectionConfiguration<E> {
    rule: CollectionRule,
    _phantom: PhantomData<fn(&E)>,
}

impl<E: 'static> CollectionConfiguration<E> {
    pub(crate) fn new() -> Self {
        CollectionConfiguration {
            rule: CollectionRule::new(MemberType::of::<E>()),
            _phantom: PhantomData,
        }
    }

    /// Excludes the member from comparison.
    pub fn ignore(&mut self) -> &mut Self {
        self.rule.ignored = true;
        self
    }

    /// Treats the collection as unordered.
    pub fn ignore_order(&mut self) -> &mut Self {
        self.rule.ordered = false;
        self
    }

    /// Pairs elements by key before comparing them.
    ///
    /// Replaces any previous element strategy. Ordering is untouched; call
    /// [`ignore_order`](Self::ignore_order) to pair elements regardless of position.
    pub fn match_by<K, F>(&mut self, key: F) -> &mut Self
    where
        K: PartialEq + 'static,
        F: Fn(&E) -> K + Send + Sync + 'static,
    {
        self.rule.element =
            ElementComparison::Keyed(CustomComparer::new::<E, _>(move |a, b| key(a) == key(b)));
        self
    }

    /// Compares elements with `predicate` instead of structurally.
    ///
    /// Replaces any previous element strategy. Ordering is untouched.
    pub fn compare_elements_with<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&E, &E) -> bool + Send + Sync + 'static,
    {
        self.rule.element = ElementComparison::Custom(CustomComparer::new::<E, F>(predicate));
        self
    }

    pub(crate) fn into_rule(self) -> MemberRule {
        MemberRule::Collection(self.rule)
    }
}
