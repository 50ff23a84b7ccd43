//! Priced items: the two node kinds of a price tree.

use std::fmt;

use crate::domain::arena::ItemId;
use crate::domain::error::{DomainError, DomainResult};

/// Capability shared by every node of a price tree.
///
/// Client code walking a tree only relies on this trait and never needs
/// to know whether it holds a leaf or a container.
pub trait PricedItem {
    /// Display name of the item.
    fn name(&self) -> String;

    /// Total price of the item.
    fn price(&self) -> f64;
}

/// A single sellable unit with a fixed name and price.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    name: String,
    price: f64,
}

impl Leaf {
    /// Create a leaf, rejecting negative and non finite prices.
    pub fn new(name: impl Into<String>, price: f64) -> DomainResult<Self> {
        let name = name.into();
        if !price.is_finite() {
            return Err(DomainError::NonFinitePrice { name });
        }
        if price < 0.0 {
            return Err(DomainError::NegativePrice { name, price });
        }
        Ok(Self { name, price })
    }
}

impl PricedItem for Leaf {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn price(&self) -> f64 {
        self.price
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A group of priced items, held as arena handles in insertion order.
///
/// The child sequence only grows through [`ItemArena::add`](crate::domain::ItemArena::add).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    children: Vec<ItemId>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Synthesized name, counting direct children only.
    pub fn name(&self) -> String {
        container_name(self.children.len())
    }

    pub(crate) fn push(&mut self, item: ItemId) {
        self.children.push(item);
    }
}

/// Name of a container holding `count` direct children.
pub fn container_name(count: usize) -> String {
    format!("a container with {} items", count)
}

/// Node payload: either a leaf or a container.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Leaf(Leaf),
    Container(Container),
}

impl ItemKind {
    pub fn is_leaf(&self) -> bool {
        matches!(self, ItemKind::Leaf(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ItemKind::Container(_))
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[ItemId] {
        match self {
            ItemKind::Leaf(_) => &[],
            ItemKind::Container(c) => c.children(),
        }
    }
}
