//! Comparable domain fixtures.

use autocompare::Comparable;

/// Seconds since the epoch; stands in for a date-time member type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

/// A person with properties, a public field and a private member.
#[derive(Clone, Debug, Comparable)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub updated: Timestamp,
    pub tags: Vec<String>,

    #[compare(field)]
    pub nickname: String,

    pub(crate) secret: String,
}

impl Person {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Person {
            id,
            name: name.into(),
            updated: Timestamp(0),
            tags: Vec::new(),
            nickname: String::new(),
            secret: String::new(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// One line of an order.
#[derive(Clone, Debug, PartialEq, Comparable)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
}

/// An order with a collection of line items.
#[derive(Clone, Debug, Comparable)]
pub struct Order {
    pub id: u64,
    pub placed: Timestamp,
    pub lines: Vec<LineItem>,
    pub notes: [String; 2],

    #[compare(skip)]
    pub cache_key: Option<u64>,
}
