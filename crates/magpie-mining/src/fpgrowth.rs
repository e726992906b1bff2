//! FP-Growth over conditional FP-trees.
//!
//! The recursion of the classic algorithm runs on an explicit work stack of
//! [`Frame`]s, so stack use stays flat however deep the conditional trees
//! nest. Each frame mines one tree under one prefix:
//!
//! 1. If the tree is a single path, every combination of the path's items
//!    extends the prefix, and the frame is done.
//! 2. Otherwise, for each header item `i` (least frequent first) with
//!    enough support, `prefix ∪ {i}` is emitted and the conditional tree of
//!    `i`, pruned at the minimum support, is pushed as a new frame.

use magpie_common::warning::warn_once;

use crate::config::MiningConfig;
use crate::dataset::DataSet;
use crate::fptree::FpTree;
use crate::item::{ItemId, ItemTable};
use crate::itemset::ItemSet;
use crate::itemset_list::ItemSetLists;

/// Longest single path enumerated with a `u64` bitmask when subsumed subsets
/// are kept.
pub const MAX_SINGLE_PATH: usize = 63;

/// One pending conditional tree.
struct Frame {
    tree: FpTree,
    prefix: ItemSet,
    depth: usize,
}

/// Mine every frequent item set of `dataset` into `results`.
///
/// # Panics
/// Panics if a mined set's support disagrees with the tree's count for it,
/// which means the tree or the item table is corrupt.
pub fn mine(
    dataset: &DataSet,
    table: &ItemTable,
    config: &MiningConfig,
    results: &mut ItemSetLists,
) {
    let min_support = config.min_support;

    let mut global = FpTree::new();
    for transaction in dataset {
        global.insert(&transaction.items, 1);
    }
    global.prune(min_support);

    let mut stack = vec![Frame {
        tree: global,
        prefix: ItemSet::empty(table),
        depth: 0,
    }];

    while let Some(Frame { tree, prefix, depth }) = stack.pop() {
        #[cfg(feature = "mining-trace")]
        eprintln!(
            "[MINING] depth={depth} prefix={} header={}",
            prefix.display(table),
            tree.header_items().count()
        );

        if config.single_path_shortcut
            && let Some(path) = tree.single_path()
        {
            if enumerable(path.len(), config) {
                emit_single_path(&path, &prefix, table, config, results);
                continue;
            }
            warn_once(
                "Mining",
                &format!(
                    "single path of {} items is too long to enumerate directly; recursing instead",
                    path.len()
                ),
            );
        }

        // Least frequent first, so the smallest conditional trees come first.
        for item in tree.header_items().rev() {
            let support = tree.item_support(item);
            if support < min_support {
                continue;
            }

            let extended = prefix.with(table.get(item));
            assert_eq!(
                extended.support_size(),
                support,
                "tree count for {} disagrees with its support",
                extended.display(table)
            );
            let _ = results.insert(extended.clone());

            let mut conditional = FpTree::from_pattern_base(&tree.conditional_pattern_base(item));
            conditional.prune(min_support);
            if !conditional.is_empty() {
                stack.push(Frame {
                    tree: conditional,
                    prefix: extended,
                    depth: depth + 1,
                });
            }
        }
    }
}

/// Whether a single path of `len` items can be emitted directly. Only the
/// bitmask enumeration of keep-subsets mode is bounded; the closed runs of
/// maximal mode are a linear walk.
const fn enumerable(len: usize, config: &MiningConfig) -> bool {
    config.remove_subsumed_subsets || len <= MAX_SINGLE_PATH
}

/// Emit the combinations of a single path's items, each extending `prefix`.
///
/// On a single path the transactions containing a node's item are exactly
/// those through that node, so any combination has the support of its
/// deepest node. When subsumed subsets are removed, only the leading runs
/// ending where the count drops (or at the leaf) can be maximal, and only
/// those are emitted.
fn emit_single_path(
    path: &[(ItemId, usize)],
    prefix: &ItemSet,
    table: &ItemTable,
    config: &MiningConfig,
    results: &mut ItemSetLists,
) {
    let emit = |members: &mut dyn Iterator<Item = ItemId>,
                expected: usize,
                results: &mut ItemSetLists| {
        let mut set = prefix.clone();
        for id in members {
            let _ = set.add(table.get(id));
        }
        assert_eq!(
            set.support_size(),
            expected,
            "single-path count for {} disagrees with its support",
            set.display(table)
        );
        let _ = results.insert(set);
    };

    if config.remove_subsumed_subsets {
        for (end, &(_, count)) in path.iter().enumerate() {
            let drops = path.get(end + 1).is_none_or(|next| next.1 < count);
            if drops {
                emit(&mut path[..=end].iter().map(|(id, _)| *id), count, results);
            }
        }
        return;
    }

    let combinations: u64 = 1 << path.len();
    for mask in 1..combinations {
        let deepest = (u64::BITS - 1 - mask.leading_zeros()) as usize;
        let mut members = path
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, (id, _))| *id);
        emit(&mut members, path[deepest].1, results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerable_bounds_only_keep_subsets_mode() {
        let maximal = MiningConfig::default();
        let keep_subsets = MiningConfig::default().with_subsumed_subsets(false);

        assert!(enumerable(MAX_SINGLE_PATH, &keep_subsets));
        assert!(!enumerable(MAX_SINGLE_PATH + 1, &keep_subsets));
        assert!(enumerable(MAX_SINGLE_PATH + 1, &maximal));
        assert!(enumerable(500, &maximal));
    }
}
