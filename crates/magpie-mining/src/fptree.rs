//! Arena-based FP-tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]: the parent
//! back-reference, the children, and the `next` link that threads every node
//! carrying the same item into one chain. The header table maps each item to
//! the head and tail of its chain, so every occurrence of an item is reached
//! without searching the tree.

use std::collections::BTreeMap;

use crate::item::ItemId;

/// A type-safe index into an [`FpTree`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root sentinel is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One node of the tree. The root carries no item.
#[derive(Debug, Clone)]
pub struct FpNode {
    /// The item, `None` for the root.
    pub item: Option<ItemId>,
    /// Number of transactions whose path runs through this node.
    pub count: usize,
    /// The parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Child nodes in insertion order.
    pub children: Vec<NodeId>,
    /// The next node carrying the same item.
    pub next: Option<NodeId>,
}

/// Ends of one item's link chain.
#[derive(Debug, Clone, Copy)]
struct Chain {
    head: NodeId,
    tail: NodeId,
}

/// A weighted path from the root, as found in a conditional pattern base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPath {
    /// Items from the root down, in rank order.
    pub items: Vec<ItemId>,
    /// How many transactions share the path.
    pub count: usize,
}

/// A compressed prefix tree over transactions.
#[derive(Debug, Clone)]
pub struct FpTree {
    nodes: Vec<FpNode>,
    header: BTreeMap<ItemId, Chain>,
}

impl Default for FpTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FpTree {
    /// A tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![FpNode {
                item: None,
                count: 0,
                parent: None,
                children: Vec::new(),
                next: None,
            }],
            header: BTreeMap::new(),
        }
    }

    /// Build the conditional tree of a pattern base.
    #[must_use]
    pub fn from_pattern_base(base: &[PrefixPath]) -> Self {
        let mut tree = Self::new();
        for path in base {
            tree.insert(&path.items, path.count);
        }
        tree
    }

    /// Insert a transaction (or a prefix path shared by `count` transactions).
    ///
    /// `items` must be in rank order. Existing children carrying the next item
    /// have their count raised; only the unshared suffix creates nodes.
    pub fn insert(&mut self, items: &[ItemId], count: usize) {
        if count == 0 {
            return;
        }
        self.nodes[NodeId::ROOT.0].count += count;
        let mut current = NodeId::ROOT;
        for &item in items {
            let existing = self.nodes[current.0]
                .children
                .iter()
                .copied()
                .find(|child| self.nodes[child.0].item == Some(item));
            current = match existing {
                Some(child) => {
                    self.nodes[child.0].count += count;
                    child
                }
                None => self.push_child(current, item, count),
            };
        }
    }

    fn push_child(&mut self, parent: NodeId, item: ItemId, count: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(FpNode {
            item: Some(item),
            count,
            parent: Some(parent),
            children: Vec::new(),
            next: None,
        });
        self.nodes[parent.0].children.push(id);

        match self.header.get_mut(&item) {
            Some(chain) => {
                self.nodes[chain.tail.0].next = Some(id);
                chain.tail = id;
            }
            None => {
                let _ = self.header.insert(item, Chain { head: id, tail: id });
            }
        }
        id
    }

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &FpNode {
        &self.nodes[id.0]
    }

    /// The items of the header table, in rank order.
    pub fn header_items(&self) -> impl DoubleEndedIterator<Item = ItemId> + '_ {
        self.header.keys().copied()
    }

    /// Every node carrying `item`, following its link chain.
    pub fn occurrences(&self, item: ItemId) -> impl Iterator<Item = NodeId> + '_ {
        let mut next = self.header.get(&item).map(|chain| chain.head);
        core::iter::from_fn(move || {
            let current = next?;
            next = self.nodes[current.0].next;
            Some(current)
        })
    }

    /// Number of transactions containing `item`: the sum of the counts along
    /// its link chain.
    #[must_use]
    pub fn item_support(&self, item: ItemId) -> usize {
        self.occurrences(item).map(|node| self.nodes[node.0].count).sum()
    }

    /// Check if the tree holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes[NodeId::ROOT.0].children.is_empty()
    }

    /// Check if no node has more than one child.
    #[must_use]
    pub fn has_single_path(&self) -> bool {
        let mut current = NodeId::ROOT;
        loop {
            match self.nodes[current.0].children.as_slice() {
                [] => return true,
                [only] => current = *only,
                _ => return false,
            }
        }
    }

    /// The `(item, count)` pairs along the tree's only path, root side
    /// first, or `None` if the tree branches.
    #[must_use]
    pub fn single_path(&self) -> Option<Vec<(ItemId, usize)>> {
        let mut path = Vec::new();
        let mut current = NodeId::ROOT;
        loop {
            match self.nodes[current.0].children.as_slice() {
                [] => return Some(path),
                [only] => {
                    let node = &self.nodes[only.0];
                    path.push((node.item?, node.count));
                    current = *only;
                }
                _ => return None,
            }
        }
    }

    /// Remove every item supported by fewer than `min_support` transactions.
    ///
    /// A removed node's children are spliced into its parent in its place, so
    /// no descendant is lost. Spliced children are not merged with siblings
    /// carrying the same item; counts along every link chain stay exact.
    pub fn prune(&mut self, min_support: usize) {
        let infrequent: Vec<ItemId> = self
            .header
            .keys()
            .copied()
            .filter(|item| self.item_support(*item) < min_support)
            .collect();

        for item in infrequent {
            let nodes: Vec<NodeId> = self.occurrences(item).collect();
            for node in nodes {
                self.splice(node);
            }
            let _ = self.header.remove(&item);
        }
    }

    fn splice(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent else {
            return;
        };
        let children = core::mem::take(&mut self.nodes[node.0].children);
        for child in &children {
            self.nodes[child.0].parent = Some(parent);
        }

        let siblings = &mut self.nodes[parent.0].children;
        if let Some(at) = siblings.iter().position(|c| *c == node) {
            let _ = siblings.splice(at..=at, children);
        }

        let removed = &mut self.nodes[node.0];
        removed.parent = None;
        removed.item = None;
        removed.count = 0;
    }

    /// The conditional pattern base of `item`: for every node carrying it,
    /// the path from the root down to (excluding) that node, weighted by the
    /// node's count. Empty paths are left out.
    #[must_use]
    pub fn conditional_pattern_base(&self, item: ItemId) -> Vec<PrefixPath> {
        self.occurrences(item)
            .filter_map(|node| {
                let count = self.nodes[node.0].count;
                let mut items = Vec::new();
                let mut current = self.nodes[node.0].parent;
                while let Some(id) = current {
                    let ancestor = &self.nodes[id.0];
                    if let Some(item) = ancestor.item {
                        items.push(item);
                    }
                    current = ancestor.parent;
                }
                items.reverse();
                (!items.is_empty()).then_some(PrefixPath { items, count })
            })
            .collect()
    }

    /// Number of live item-carrying nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.header
            .keys()
            .map(|item| self.occurrences(*item).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId).collect()
    }

    fn tree(transactions: &[&[usize]]) -> FpTree {
        let mut tree = FpTree::new();
        for t in transactions {
            tree.insert(&ids(t), 1);
        }
        tree
    }

    #[test]
    fn test_shared_prefixes_compress() {
        let tree = tree(&[&[0, 1, 2], &[0, 1], &[0, 3]]);
        // 0 -> 1 -> 2, 0 -> 3
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.item_support(ItemId(0)), 3);
        assert_eq!(tree.item_support(ItemId(1)), 2);
        assert_eq!(tree.item_support(ItemId(3)), 1);
        assert!(!tree.has_single_path());
        assert_eq!(tree.header_items().collect::<Vec<_>>(), ids(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_link_chain_spans_branches() {
        let tree = tree(&[&[0, 2], &[1, 2], &[2]]);
        assert_eq!(tree.occurrences(ItemId(2)).count(), 3);
        assert_eq!(tree.item_support(ItemId(2)), 3);
    }

    #[test]
    fn test_single_path() {
        let tree = tree(&[&[0, 1, 2], &[0, 1]]);
        assert!(tree.has_single_path());
        assert_eq!(
            tree.single_path(),
            Some(vec![(ItemId(0), 2), (ItemId(1), 2), (ItemId(2), 1)])
        );
        assert!(FpTree::new().has_single_path());
        assert!(FpTree::new().is_empty());
    }

    #[test]
    fn test_conditional_pattern_base() {
        let tree = tree(&[&[0, 1, 3], &[0, 3], &[1, 3], &[3]]);
        let mut base = tree.conditional_pattern_base(ItemId(3));
        base.sort_by(|a, b| a.items.cmp(&b.items));
        assert_eq!(
            base,
            vec![
                PrefixPath { items: ids(&[0]), count: 1 },
                PrefixPath { items: ids(&[0, 1]), count: 1 },
                PrefixPath { items: ids(&[1]), count: 1 },
            ]
        );
    }

    #[test]
    fn test_prune_splices_children_into_parent() {
        // 1 is infrequent; its child 2 must survive under 0.
        let mut tree = tree(&[&[0, 1, 2], &[0, 2], &[0, 3, 2]]);
        tree.prune(2);
        assert_eq!(tree.header_items().collect::<Vec<_>>(), ids(&[0, 2]));
        assert_eq!(tree.item_support(ItemId(2)), 3);
        assert_eq!(tree.item_support(ItemId(0)), 3);

        // Every 2 now hangs directly under 0.
        for node in tree.occurrences(ItemId(2)) {
            let parent = tree.node(node).parent.map(|p| tree.node(p).item);
            assert_eq!(parent, Some(Some(ItemId(0))));
        }
        // Spliced siblings are not merged, so the tree branches.
        assert!(!tree.has_single_path());
        assert_eq!(
            tree.conditional_pattern_base(ItemId(2))
                .iter()
                .map(|p| p.count)
                .sum::<usize>(),
            3
        );
    }

    #[test]
    fn test_prune_everything() {
        let mut tree = tree(&[&[0], &[1]]);
        tree.prune(2);
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
    }
}
