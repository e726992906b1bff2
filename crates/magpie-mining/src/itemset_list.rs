//! Result lists: item sets grouped by cardinality, with subsumed subsets
//! removed.
//!
//! [`ItemSetLists`] receives item sets from a miner in any order. When
//! subsumed-subset removal is on, every insert checks both directions: a new
//! set is rejected if a kept superset has the same support, and kept subsets
//! with the same support are evicted. Since subsumption is transitive, the
//! final content does not depend on insertion order.
//!
//! Equal-support candidates are found through an index keyed by the support
//! set itself, so only sets with identical support are ever compared.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::itemset::ItemSet;
use crate::support::Support;

/// The item sets of one cardinality.
#[derive(Debug, Clone, Default)]
pub struct ItemSetList {
    cardinality: usize,
    sets: BTreeSet<ItemSet>,
}

impl ItemSetList {
    /// An empty list for sets of `cardinality` members.
    #[must_use]
    pub const fn new(cardinality: usize) -> Self {
        Self {
            cardinality,
            sets: BTreeSet::new(),
        }
    }

    /// Add a set. Returns `false` if an equal set is already present.
    ///
    /// # Panics
    /// Panics if the set is empty or has the wrong cardinality.
    pub fn add(&mut self, set: ItemSet) -> bool {
        assert!(!set.is_empty(), "the empty item set is never a result");
        assert_eq!(set.len(), self.cardinality, "item set added to the wrong list");
        self.sets.insert(set)
    }

    /// Remove a set. Returns `false` if it was not present.
    pub fn remove(&mut self, set: &ItemSet) -> bool {
        self.sets.remove(set)
    }

    /// Check if an equal set is present.
    #[must_use]
    pub fn contains(&self, set: &ItemSet) -> bool {
        self.sets.contains(set)
    }

    /// Check if some member subsumes `set`.
    #[must_use]
    pub fn subsumes(&self, set: &ItemSet) -> bool {
        self.sets.iter().any(|member| set.is_subsumed_by(member))
    }

    /// The member cardinality.
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// The largest support of any member, or 0 for an empty list.
    #[must_use]
    pub fn max_support(&self) -> usize {
        self.sets.iter().map(ItemSet::support_size).max().unwrap_or(0)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if the list has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterate over members in canonical member order.
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, ItemSet> {
        self.sets.iter()
    }
}

impl<'a> IntoIterator for &'a ItemSetList {
    type Item = &'a ItemSet;
    type IntoIter = std::collections::btree_set::Iter<'a, ItemSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

/// Every result item set of a mining run, one [`ItemSetList`] per
/// cardinality.
#[derive(Debug, Clone)]
pub struct ItemSetLists {
    min_support: usize,
    remove_subsumed: bool,
    lists: BTreeMap<usize, ItemSetList>,
    /// Kept sets by support.
    by_support: HashMap<Support, Vec<ItemSet>>,
}

impl ItemSetLists {
    /// Empty results for a run at `min_support`.
    #[must_use]
    pub fn new(min_support: usize, remove_subsumed: bool) -> Self {
        Self {
            min_support,
            remove_subsumed,
            lists: BTreeMap::new(),
            by_support: HashMap::new(),
        }
    }

    /// Offer a mined item set. Returns `true` if it was kept.
    ///
    /// # Panics
    /// Panics if the set is empty or its support is below the minimum. A
    /// miner never produces either.
    pub fn insert(&mut self, set: ItemSet) -> bool {
        assert!(
            set.support_size() >= self.min_support,
            "item set {:?} with support {} below the minimum {}",
            set.items(),
            set.support_size(),
            self.min_support
        );

        let list = self
            .lists
            .entry(set.len())
            .or_insert_with(|| ItemSetList::new(set.len()));
        if list.contains(&set) {
            return false;
        }

        if self.remove_subsumed {
            let peers = self.by_support.entry(set.support().clone()).or_default();
            if peers.iter().any(|kept| set.is_subsumed_by(kept)) {
                return false;
            }
            let (evicted, kept): (Vec<ItemSet>, Vec<ItemSet>) =
                peers.drain(..).partition(|kept| kept.is_subsumed_by(&set));
            *peers = kept;
            peers.push(set.clone());
            for subset in &evicted {
                if let Some(list) = self.lists.get_mut(&subset.len()) {
                    let _ = list.remove(subset);
                }
            }
        }

        let list = self
            .lists
            .entry(set.len())
            .or_insert_with(|| ItemSetList::new(set.len()));
        list.add(set)
    }

    /// The non-empty lists in ascending cardinality.
    pub fn lists(&self) -> impl Iterator<Item = &ItemSetList> {
        self.lists.values().filter(|list| !list.is_empty())
    }

    /// The list of sets with `cardinality` members, if any were kept.
    #[must_use]
    pub fn list(&self, cardinality: usize) -> Option<&ItemSetList> {
        self.lists.get(&cardinality).filter(|list| !list.is_empty())
    }

    /// Every kept set, by ascending cardinality.
    pub fn iter(&self) -> impl Iterator<Item = &ItemSet> {
        self.lists.values().flat_map(ItemSetList::iter)
    }

    /// Total number of kept sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.values().map(ItemSetList::len).sum()
    }

    /// Check if nothing was kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The largest support over all kept sets, or 0.
    #[must_use]
    pub fn max_support(&self) -> usize {
        self.lists.values().map(ItemSetList::max_support).max().unwrap_or(0)
    }

    /// The minimum support this run was mined at.
    #[must_use]
    pub const fn min_support(&self) -> usize {
        self.min_support
    }

    /// Whether subsumed subsets are being removed.
    #[must_use]
    pub const fn removes_subsumed(&self) -> bool {
        self.remove_subsumed
    }
}

#[cfg(test)]
mod tests {
    use magpie_css::parse_stylesheet;

    use super::*;
    use crate::item::{ItemId, ItemTable};

    fn table() -> ItemTable {
        // color: .a .b .c, margin: .a .b, top: .a .b .c
        ItemTable::build(&parse_stylesheet(
            ".a { color: red; margin: 0; top: 1px }\n\
             .b { color: red; margin: 0; top: 1px }\n\
             .c { color: red; top: 1px }",
        ))
    }

    fn set(table: &ItemTable, ids: &[usize]) -> ItemSet {
        ItemSet::from_items(table, ids.iter().copied().map(ItemId))
    }

    #[test]
    fn test_list_rejects_duplicates() {
        let table = table();
        let mut list = ItemSetList::new(1);
        assert!(list.add(set(&table, &[0])));
        assert!(!list.add(set(&table, &[0])));
        assert_eq!(list.len(), 1);
        assert_eq!(list.max_support(), 3);
    }

    #[test]
    fn test_subsumed_subset_rejected_in_either_order() {
        let table = table();
        assert_eq!(table.get(ItemId(2)).shape().property, "margin");

        // Subset first, then superset: the subset is evicted.
        let mut lists = ItemSetLists::new(2, true);
        assert!(lists.insert(set(&table, &[2])));
        assert!(lists.insert(set(&table, &[0, 2])));
        assert!(lists.list(1).is_none());
        assert_eq!(lists.len(), 1);

        // Superset first, then subset: the subset is rejected.
        let mut lists = ItemSetLists::new(2, true);
        assert!(lists.insert(set(&table, &[0, 1, 2])));
        assert!(!lists.insert(set(&table, &[2])));
        assert!(!lists.insert(set(&table, &[1, 2])));
        assert_eq!(lists.len(), 1);
    }

    #[test]
    fn test_different_support_is_not_subsumed() {
        let table = table();
        let mut lists = ItemSetLists::new(2, true);
        assert!(lists.insert(set(&table, &[0, 1])));
        assert!(lists.insert(set(&table, &[0, 1, 2])));
        assert_eq!(lists.list(2).map(ItemSetList::max_support), Some(3));
        assert_eq!(lists.list(3).map(ItemSetList::max_support), Some(2));
        assert_eq!(lists.max_support(), 3);
    }

    #[test]
    fn test_keep_subsets() {
        let table = table();
        let mut lists = ItemSetLists::new(2, false);
        assert!(lists.insert(set(&table, &[2])));
        assert!(lists.insert(set(&table, &[0, 2])));
        assert!(!lists.insert(set(&table, &[2])));
        assert_eq!(lists.len(), 2);
        assert_eq!(lists.lists().map(ItemSetList::cardinality).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "below the minimum")]
    fn test_infrequent_set_panics() {
        let table = table();
        let mut lists = ItemSetLists::new(4, true);
        let _ = lists.insert(set(&table, &[0]));
    }
}
