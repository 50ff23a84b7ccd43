//! Boxes of products: the reference scenario replayed by `pricetree demo`.

use crate::domain::{DomainResult, ItemArena, ItemId};

/// Outcome of building the reference scenario.
#[derive(Debug)]
pub struct ReferenceCatalog {
    pub arena: ItemArena,
    /// The outer box
    pub outer: ItemId,
    /// The inner box holding the two TVs
    pub inner: ItemId,
    /// Names of added items, in the order they were added
    pub added: Vec<String>,
}

impl ReferenceCatalog {
    fn add(&mut self, container: ItemId, item: ItemId) -> DomainResult<()> {
        let name = self.arena.name(item)?;
        self.arena.add(container, item)?;
        self.added.push(name);
        Ok(())
    }
}

/// Two products in an outer box, two TVs in an inner box, inner box into outer box.
pub fn reference_catalog() -> DomainResult<ReferenceCatalog> {
    let mut arena = ItemArena::new();
    let outer = arena.insert_container();
    let inner = arena.insert_container();
    let mut catalog = ReferenceCatalog {
        arena,
        outer,
        inner,
        added: Vec::new(),
    };

    let gum = catalog.arena.insert_leaf("Bubble gum", 0.5)?;
    catalog.add(outer, gum)?;
    let phone = catalog.arena.insert_leaf("Samsung Note 20", 1005.0)?;
    catalog.add(outer, phone)?;

    let small_tv = catalog.arena.insert_leaf("Samsung TV 20in", 300.0)?;
    catalog.add(inner, small_tv)?;
    let big_tv = catalog.arena.insert_leaf("Samsung TV 50in", 800.0)?;
    catalog.add(inner, big_tv)?;

    catalog.add(outer, inner)?;
    Ok(catalog)
}
