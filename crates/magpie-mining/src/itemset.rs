//! Item sets and their derived support.

use core::fmt;

use crate::item::{Item, ItemId, ItemTable};
use crate::support::Support;

/// An unordered group of items whose support is the intersection of the
/// members' supports.
///
/// Members are stored sorted by [`ItemId`], i.e. in canonical item order.
/// Identity is the member set only: two item sets with the same members are
/// equal whatever support they carry.
#[derive(Debug, Clone)]
pub struct ItemSet {
    items: Vec<ItemId>,
    support: Support,
}

impl ItemSet {
    /// The empty item set, supported by every selector in the table's
    /// stylesheet. Only used as the starting prefix of a mining run.
    #[must_use]
    pub fn empty(table: &ItemTable) -> Self {
        Self {
            items: Vec::new(),
            support: table.universe(),
        }
    }

    /// An item set of the given members.
    #[must_use]
    pub fn from_items(table: &ItemTable, items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut set = Self::empty(table);
        for id in items {
            let _ = set.add(table.get(id));
        }
        set
    }

    /// Add an item, narrowing the support to the intersection.
    ///
    /// Returns `false` (and changes nothing) if the item is already a member.
    pub fn add(&mut self, item: &Item) -> bool {
        match self.items.binary_search(&item.id()) {
            Ok(_) => false,
            Err(at) => {
                self.items.insert(at, item.id());
                self.support = self.support.intersect(item.support());
                true
            }
        }
    }

    /// A copy of this set with `item` added.
    #[must_use]
    pub fn with(&self, item: &Item) -> Self {
        let mut set = self.clone();
        let _ = set.add(item);
        set
    }

    /// Remove an item, rebuilding the support from the remaining members.
    ///
    /// Intersection cannot be undone, so the support is recomputed from the
    /// table. Returns `false` if the item was not a member.
    pub fn remove(&mut self, id: ItemId, table: &ItemTable) -> bool {
        let Ok(at) = self.items.binary_search(&id) else {
            return false;
        };
        let _ = self.items.remove(at);
        self.support = Self::intersection(&self.items, table);
        true
    }

    /// The members in canonical order.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Check if `id` is a member.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.binary_search(&id).is_ok()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The selectors declaring every member.
    #[must_use]
    pub const fn support(&self) -> &Support {
        &self.support
    }

    /// Number of selectors declaring every member.
    #[must_use]
    pub fn support_size(&self) -> usize {
        self.support.len()
    }

    /// Check if every member of `self` is a member of `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.items.iter().all(|id| other.contains(*id))
    }

    /// `self` is subsumed by `other` iff it is a proper subset of `other` with
    /// exactly the same support: `other` explains every selector `self` does.
    #[must_use]
    pub fn is_subsumed_by(&self, other: &Self) -> bool {
        self.len() < other.len() && self.support == other.support && self.is_subset(other)
    }

    /// Assert that the carried support is the intersection of the members'
    /// supports.
    ///
    /// # Panics
    /// Panics if it is not. That is a logic error in whoever built the set.
    pub fn assert_support(&self, table: &ItemTable) {
        let expected = Self::intersection(&self.items, table);
        assert_eq!(
            self.support, expected,
            "item set {:?} carries a support that is not its members' intersection",
            self.items
        );
    }

    fn intersection(items: &[ItemId], table: &ItemTable) -> Support {
        items.iter().fold(table.universe(), |support, id| {
            support.intersect(table.get(*id).support())
        })
    }

    /// Display the members' canonical shapes, e.g. `{color: rgba(255, 0, 0, 1); margin: 0px}`.
    #[must_use]
    pub fn display<'a>(&'a self, table: &'a ItemTable) -> impl fmt::Display + 'a {
        DisplayItemSet { set: self, table }
    }
}

impl PartialEq for ItemSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for ItemSet {}

impl core::hash::Hash for ItemSet {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl PartialOrd for ItemSet {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemSet {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.items.cmp(&other.items)
    }
}

struct DisplayItemSet<'a> {
    set: &'a ItemSet,
    table: &'a ItemTable,
}

impl fmt::Display for DisplayItemSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, id) in self.set.items.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", self.table.get(*id).shape())?;
        }
        f.write_str("}")
    }
}
