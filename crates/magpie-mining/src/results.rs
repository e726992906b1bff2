//! The outcome of one mining run.

use crate::config::{Algorithm, MiningConfig};
use crate::item::ItemTable;
use crate::itemset::ItemSet;
use crate::itemset_list::{ItemSetList, ItemSetLists};

/// Mined item sets together with the item table that resolves them.
#[derive(Debug, Clone)]
pub struct MiningResults {
    table: ItemTable,
    lists: ItemSetLists,
    config: MiningConfig,
    algorithm: Algorithm,
}

impl MiningResults {
    pub(crate) const fn new(
        table: ItemTable,
        lists: ItemSetLists,
        config: MiningConfig,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            table,
            lists,
            config,
            algorithm,
        }
    }

    /// The non-empty result lists in ascending cardinality.
    pub fn lists(&self) -> impl Iterator<Item = &ItemSetList> {
        self.lists.lists()
    }

    /// The sets with `k` members, if any.
    #[must_use]
    pub fn list(&self, k: usize) -> Option<&ItemSetList> {
        self.lists.list(k)
    }

    /// Every result set, by ascending cardinality.
    pub fn iter(&self) -> impl Iterator<Item = &ItemSet> {
        self.lists.iter()
    }

    /// Total number of result sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check if no duplicated pattern was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// The largest support of any result set, or 0.
    #[must_use]
    pub fn max_support(&self) -> usize {
        self.lists.max_support()
    }

    /// The item table the result sets index into.
    #[must_use]
    pub const fn items(&self) -> &ItemTable {
        &self.table
    }

    /// The configuration of the run.
    #[must_use]
    pub const fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// The miner that produced the results.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}
