//! Domain layer: item trees and pricing rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod item;
pub mod tree_traits;

pub use arena::{ItemArena, ItemId, ItemIterator, ItemNode, ItemRef};
pub use builder::{PriceTree, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use item::{container_name, Container, ItemKind, Leaf, PricedItem};
pub use tree_traits::{PriceFormat, ToTree};
