//! Hierarchical price aggregator.
//!
//! Products (leaves) and containers of products form a tree; every node
//! answers `name()` and `price()` through [`domain::PricedItem`], with a
//! container's price always recomputed from its current children.
//!
//! ```
//! use pricetree::domain::ItemArena;
//!
//! let mut arena = ItemArena::new();
//! let outer = arena.insert_container();
//! let gum = arena.insert_leaf("Bubble gum", 0.5).unwrap();
//! arena.add(outer, gum).unwrap();
//! assert_eq!(arena.price(outer).unwrap(), 0.5);
//! assert_eq!(arena.name(outer).unwrap(), "a container with 1 items");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
