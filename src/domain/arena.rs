//! Arena storage for item trees: handles, uniform views, traversal and pricing.

use std::collections::{HashMap, HashSet};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{info, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::{Container, ItemKind, Leaf, PricedItem};

/// Stable handle to an item stored in an [`ItemArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Index);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}.{}", slot, generation)
    }
}

/// Tree node in the arena-based item structure.
#[derive(Debug)]
pub struct ItemNode {
    /// Leaf or container payload
    pub kind: ItemKind,
    /// Containers holding this item directly; empty for roots
    pub parents: Vec<ItemId>,
}

/// Arena-based storage for price trees.
///
/// Uses a generational arena for memory-safe handles and O(1) lookups.
/// An item may be added to several containers; it is then priced once per
/// occurrence. Containment is kept acyclic by [`ItemArena::add`].
#[derive(Debug, Default)]
pub struct ItemArena {
    /// Arena storage for all items
    arena: Arena<ItemNode>,
}

impl ItemArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self, name))]
    pub fn insert_leaf(&mut self, name: impl Into<String>, price: f64) -> DomainResult<ItemId> {
        let leaf = Leaf::new(name, price)?;
        Ok(self.insert(ItemKind::Leaf(leaf)))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_container(&mut self) -> ItemId {
        self.insert(ItemKind::Container(Container::new()))
    }

    fn insert(&mut self, kind: ItemKind) -> ItemId {
        ItemId(self.arena.insert(ItemNode {
            kind,
            parents: Vec::new(),
        }))
    }

    /// Append `item` to the end of `container`'s children.
    ///
    /// Rejects leaves as targets and any insertion that would make a
    /// container contain itself, directly or transitively.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, container: ItemId, item: ItemId) -> DomainResult<()> {
        let item_name = self.name(item)?;
        if !self.node(container)?.kind.is_container() {
            return Err(DomainError::NotAContainer(container));
        }
        if self.reaches_through_parents(container, item) {
            return Err(DomainError::StructuralViolation { container, item });
        }

        info!(%item, %container, "Adding {} to the container", item_name);

        if let Some(ItemNode {
            kind: ItemKind::Container(c),
            ..
        }) = self.arena.get_mut(container.0)
        {
            c.push(item);
        }
        if let Some(node) = self.arena.get_mut(item.0) {
            node.parents.push(container);
        }
        Ok(())
    }

    /// True if `target` is `start` or one of its ancestors.
    fn reaches_through_parents(&self, start: ItemId, target: ItemId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(node) = self.arena.get(current.0) {
                stack.extend(node.parents.iter().copied());
            }
        }
        false
    }

    pub fn node(&self, id: ItemId) -> DomainResult<&ItemNode> {
        self.arena.get(id.0).ok_or(DomainError::UnknownItem(id))
    }

    /// Uniform view of an item, `None` for unknown handles.
    pub fn get(&self, id: ItemId) -> Option<ItemRef<'_>> {
        self.arena.get(id.0).map(|node| ItemRef {
            arena: self,
            id,
            node,
        })
    }

    pub fn name(&self, id: ItemId) -> DomainResult<String> {
        self.get(id)
            .map(|item| item.name())
            .ok_or(DomainError::UnknownItem(id))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn price(&self, id: ItemId) -> DomainResult<f64> {
        self.node(id)?;
        Ok(self.subtree_price(id))
    }

    /// Bottom-up total below `id`: each container folds its direct
    /// children's totals in insertion order, starting from zero.
    fn subtree_price(&self, id: ItemId) -> f64 {
        let mut totals: HashMap<ItemId, f64> = HashMap::new();
        let mut stack = vec![(id, false)];

        while let Some((current, expanded)) = stack.pop() {
            if totals.contains_key(&current) {
                continue;
            }
            let Some(node) = self.arena.get(current.0) else {
                totals.insert(current, 0.0);
                continue;
            };
            match &node.kind {
                ItemKind::Leaf(leaf) => {
                    totals.insert(current, leaf.price());
                }
                ItemKind::Container(container) if expanded => {
                    let total = container.children().iter().fold(0.0, |acc, child| {
                        acc + totals.get(child).copied().unwrap_or(0.0)
                    });
                    totals.insert(current, total);
                }
                ItemKind::Container(container) => {
                    stack.push((current, true));
                    for &child in container.children().iter().rev() {
                        if !totals.contains_key(&child) {
                            stack.push((child, false));
                        }
                    }
                }
            }
        }

        totals.get(&id).copied().unwrap_or(0.0)
    }

    pub fn children(&self, id: ItemId) -> DomainResult<&[ItemId]> {
        Ok(self.node(id)?.kind.children())
    }

    pub fn parents(&self, id: ItemId) -> DomainResult<&[ItemId]> {
        Ok(&self.node(id)?.parents)
    }

    /// Items not held by any container, in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn roots(&self) -> Vec<ItemId> {
        self.arena
            .iter()
            .filter(|(_, node)| node.parents.is_empty())
            .map(|(idx, _)| ItemId(idx))
            .collect()
    }

    /// Pre-order, left-to-right traversal starting at `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, id: ItemId) -> ItemIterator<'_> {
        ItemIterator::new(self, id)
    }

    /// Collects all leaf occurrences below `id` in traversal order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self, id: ItemId) -> Vec<ItemRef<'_>> {
        self.iter(id).filter(|item| item.is_leaf()).collect()
    }

    /// Number of levels below and including `id`; 0 for unknown handles.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: ItemId) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(id, 1)];
        while let Some((current, level)) = stack.pop() {
            if let Some(node) = self.arena.get(current.0) {
                max_depth = max_depth.max(level);
                for &child in node.kind.children() {
                    stack.push((child, level + 1));
                }
            }
        }
        max_depth
    }
}

/// Borrowed view of one item, uniform over leaves and containers.
#[derive(Debug, Clone, Copy)]
pub struct ItemRef<'a> {
    arena: &'a ItemArena,
    id: ItemId,
    node: &'a ItemNode,
}

impl<'a> ItemRef<'a> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> &'a ItemKind {
        &self.node.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.node.kind.is_leaf()
    }

    pub fn is_container(&self) -> bool {
        self.node.kind.is_container()
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let arena = self.arena;
        let node = self.node;
        node.kind
            .children()
            .iter()
            .filter_map(move |&child| arena.get(child))
    }

    pub fn parents(&self) -> &'a [ItemId] {
        &self.node.parents
    }
}

impl PricedItem for ItemRef<'_> {
    fn name(&self) -> String {
        match &self.node.kind {
            ItemKind::Leaf(leaf) => leaf.name(),
            ItemKind::Container(container) => container.name(),
        }
    }

    fn price(&self) -> f64 {
        match &self.node.kind {
            ItemKind::Leaf(leaf) => leaf.price(),
            ItemKind::Container(_) => self.arena.subtree_price(self.id),
        }
    }
}

impl fmt::Display for ItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub struct ItemIterator<'a> {
    arena: &'a ItemArena,
    stack: Vec<ItemId>,
}

impl<'a> ItemIterator<'a> {
    fn new(arena: &'a ItemArena, start: ItemId) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for ItemIterator<'a> {
    type Item = ItemRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(item) = self.arena.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in item.node.kind.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some(item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;

    fn reference_tree() -> (ItemArena, ItemId, ItemId) {
        let mut arena = ItemArena::new();
        let outer = arena.insert_container();
        let gum = arena.insert_leaf("Bubble gum", 0.5).unwrap();
        let phone = arena.insert_leaf("Samsung Note 20", 1005.0).unwrap();
        arena.add(outer, gum).unwrap();
        arena.add(outer, phone).unwrap();

        let inner = arena.insert_container();
        let small_tv = arena.insert_leaf("Samsung TV 20in", 300.0).unwrap();
        let big_tv = arena.insert_leaf("Samsung TV 50in", 800.0).unwrap();
        arena.add(inner, small_tv).unwrap();
        arena.add(inner, big_tv).unwrap();
        arena.add(outer, inner).unwrap();
        (arena, outer, inner)
    }

    #[test]
    fn test_reference_tree_price_and_name() {
        testing::init_test_setup();
        let (arena, outer, inner) = reference_tree();
        assert_eq!(arena.price(outer).unwrap(), 2105.5);
        assert_eq!(arena.name(outer).unwrap(), "a container with 3 items");
        assert_eq!(arena.price(inner).unwrap(), 1100.0);
        assert_eq!(arena.name(inner).unwrap(), "a container with 2 items");
    }

    #[test]
    fn test_iter_is_preorder_left_to_right() {
        let (arena, outer, _) = reference_tree();
        let names: Vec<String> = arena.iter(outer).map(|item| item.name()).collect();
        assert_eq!(
            names,
            vec![
                "a container with 3 items",
                "Bubble gum",
                "Samsung Note 20",
                "a container with 2 items",
                "Samsung TV 20in",
                "Samsung TV 50in",
            ]
        );
    }

    #[test]
    fn test_depth_and_roots() {
        let (arena, outer, inner) = reference_tree();
        assert_eq!(arena.depth(outer), 3);
        assert_eq!(arena.depth(inner), 2);
        assert_eq!(arena.roots(), vec![outer]);
        assert_eq!(arena.parents(inner).unwrap(), &[outer]);
    }

    #[test]
    fn test_add_into_itself_is_rejected() {
        let mut arena = ItemArena::new();
        let c = arena.insert_container();
        assert_eq!(
            arena.add(c, c),
            Err(DomainError::StructuralViolation {
                container: c,
                item: c
            })
        );
        assert_eq!(arena.children(c).unwrap().len(), 0);
    }

    #[test]
    fn test_add_ancestor_into_descendant_is_rejected() {
        let (mut arena, outer, inner) = reference_tree();
        let deepest = arena.insert_container();
        arena.add(inner, deepest).unwrap();

        let err = arena.add(deepest, outer).unwrap_err();
        assert!(matches!(err, DomainError::StructuralViolation { .. }));
        assert_eq!(arena.price(outer).unwrap(), 2105.5);
    }

    #[test]
    fn test_add_into_leaf_is_rejected() {
        let mut arena = ItemArena::new();
        let leaf = arena.insert_leaf("pen", 2.0).unwrap();
        let other = arena.insert_leaf("ink", 1.0).unwrap();
        assert_eq!(arena.add(leaf, other), Err(DomainError::NotAContainer(leaf)));
    }

    #[test]
    fn test_unknown_item_from_other_arena() {
        let mut arena = ItemArena::new();
        let c = arena.insert_container();
        let other = ItemArena::new();
        assert!(other.get(c).is_none());
        assert_eq!(other.price(c), Err(DomainError::UnknownItem(c)));
    }

    #[test]
    fn test_item_ref_children_follow_insertion_order() {
        let (arena, outer, _) = reference_tree();
        let root = arena.get(outer).unwrap();
        let kinds: Vec<bool> = root.children().map(|c| c.is_container()).collect();
        assert_eq!(kinds, vec![false, false, true]);
    }
}
