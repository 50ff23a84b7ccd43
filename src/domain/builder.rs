//! Tree builder for turning manifests into item arenas.

use tracing::{debug, instrument};

use crate::domain::arena::{ItemArena, ItemId, ItemRef};
use crate::domain::entities::{ItemSpec, Manifest};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::PricedItem;

/// An arena together with the container that represents the whole manifest.
#[derive(Debug)]
pub struct PriceTree {
    pub arena: ItemArena,
    pub root: ItemId,
}

impl PriceTree {
    pub fn root_ref(&self) -> DomainResult<ItemRef<'_>> {
        self.arena
            .get(self.root)
            .ok_or(DomainError::UnknownItem(self.root))
    }

    pub fn name(&self) -> DomainResult<String> {
        Ok(self.root_ref()?.name())
    }

    pub fn total(&self) -> DomainResult<f64> {
        self.arena.price(self.root)
    }
}

/// Constructs price trees from manifests.
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a tree whose root container holds the manifest's items in order.
    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, manifest: &Manifest) -> DomainResult<PriceTree> {
        let mut arena = ItemArena::new();
        let root = arena.insert_container();

        // Reverse pushes keep siblings in manifest order when popped
        let mut stack: Vec<(&ItemSpec, ItemId)> =
            manifest.items.iter().rev().map(|spec| (spec, root)).collect();

        while let Some((spec, parent)) = stack.pop() {
            let current = match spec {
                ItemSpec::Leaf { name, price } => arena.insert_leaf(name.as_str(), *price)?,
                ItemSpec::Container { items } => {
                    let container = arena.insert_container();
                    stack.extend(items.iter().rev().map(|child| (child, container)));
                    container
                }
            };
            arena.add(parent, current)?;
        }

        debug!("built tree with {} items", arena.len());
        Ok(PriceTree { arena, root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_manifest_builds_empty_root() {
        let tree = TreeBuilder::new().build(&Manifest::default()).unwrap();
        assert_eq!(tree.total().unwrap(), 0.0);
        assert_eq!(tree.name().unwrap(), "a container with 0 items");
        assert_eq!(tree.arena.len(), 1);
    }

    #[test]
    fn test_negative_price_in_manifest_fails() {
        let manifest = Manifest {
            items: vec![ItemSpec::Leaf {
                name: "broken".into(),
                price: -3.0,
            }],
        };
        let err = TreeBuilder::new().build(&manifest).unwrap_err();
        assert!(matches!(err, DomainError::NegativePrice { .. }));
    }

    #[test]
    fn test_sibling_order_is_preserved_across_nesting() {
        let manifest = Manifest {
            items: vec![
                ItemSpec::Leaf {
                    name: "a".into(),
                    price: 1.0,
                },
                ItemSpec::Container {
                    items: vec![
                        ItemSpec::Leaf {
                            name: "b".into(),
                            price: 2.0,
                        },
                        ItemSpec::Leaf {
                            name: "c".into(),
                            price: 3.0,
                        },
                    ],
                },
                ItemSpec::Leaf {
                    name: "d".into(),
                    price: 4.0,
                },
            ],
        };
        let tree = TreeBuilder::new().build(&manifest).unwrap();
        let leaves: Vec<String> = tree
            .arena
            .leaves(tree.root)
            .iter()
            .map(|leaf| leaf.name())
            .collect();
        assert_eq!(leaves, vec!["a", "b", "c", "d"]);
        assert_eq!(tree.total().unwrap(), 10.0);
    }
}
