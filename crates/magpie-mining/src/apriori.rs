//! Apriori: level-wise frequent item set mining.
//!
//! Level 1 holds the frequent single items. Level `k + 1` candidates join
//! two level-`k` sets that agree on all but their last member, are dropped
//! if any of their `k`-subsets is not frequent, and are kept if the
//! intersection of their members' supports is large enough. The search stops
//! at the first empty level.

use std::collections::HashSet;

use crate::config::MiningConfig;
use crate::dataset::DataSet;
use crate::item::{ItemId, ItemTable};
use crate::itemset::ItemSet;
use crate::itemset_list::ItemSetLists;

/// Mine every frequent item set of `dataset` into `results`.
pub fn mine(dataset: &DataSet, table: &ItemTable, config: &MiningConfig, results: &mut ItemSetLists) {
    let min_support = config.min_support;
    let empty = ItemSet::empty(table);

    let mut level: Vec<ItemSet> = dataset
        .items()
        .into_iter()
        .map(|id| empty.with(table.get(id)))
        .filter(|set| set.support_size() >= min_support)
        .collect();

    while !level.is_empty() {
        for set in &level {
            set.assert_support(table);
            let _ = results.insert(set.clone());
        }
        level = next_level(&level, table, min_support);
    }
}

/// Join, prune and count the candidates one member larger than `level`.
///
/// `level` must be sorted by members, which keeps sets sharing a prefix
/// adjacent.
fn next_level(level: &[ItemSet], table: &ItemTable, min_support: usize) -> Vec<ItemSet> {
    let frequent: HashSet<&[ItemId]> = level.iter().map(ItemSet::items).collect();
    let mut next = Vec::new();

    for (i, left) in level.iter().enumerate() {
        let (prefix, _) = left.items().split_at(left.len() - 1);
        for right in &level[i + 1..] {
            if !right.items().starts_with(prefix) {
                break;
            }
            let Some(&last) = right.items().last() else {
                continue;
            };
            let candidate = left.with(table.get(last));
            if !all_subsets_frequent(&candidate, &frequent) {
                continue;
            }
            if candidate.support_size() >= min_support {
                next.push(candidate);
            }
        }
    }

    next.sort();
    next
}

/// Check that dropping any one member leaves a set of the previous level.
fn all_subsets_frequent(candidate: &ItemSet, frequent: &HashSet<&[ItemId]>) -> bool {
    let items = candidate.items();
    (0..items.len()).all(|skip| {
        let subset: Vec<ItemId> = items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, id)| *id)
            .collect();
        frequent.contains(subset.as_slice())
    })
}
