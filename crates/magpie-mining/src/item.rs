//! Items: canonical declaration shapes and the selectors that declare them.
//!
//! [`ItemTable::build`] makes a single pass over a stylesheet, groups
//! declarations by [`DeclarationShape`], and freezes the global item order:
//! descending support size, ties broken by the shape's textual key. Item ids
//! are handed out in that order, so comparing two [`ItemId`]s compares the
//! items' ranks and a transaction sorted by id is in canonical order.

use std::collections::{BTreeSet, HashMap};

use magpie_css::{Declaration, DeclarationShape, SelectorId, Stylesheet};

use crate::support::Support;

/// A type-safe index into an [`ItemTable`]. Lower ids rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

/// Where one declaration of an item sits in the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationRef {
    /// The declaring selector.
    pub selector: SelectorId,
    /// Index into the selector's declarations.
    pub index: usize,
}

/// One canonical declaration shape and every selector declaring it.
///
/// Items are immutable once the table is built. Two items are equal iff
/// their shapes are.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    shape: DeclarationShape,
    support: Support,
    occurrences: Vec<DeclarationRef>,
}

impl Item {
    /// The item's id, which is also its rank.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// The canonical declaration shape.
    #[must_use]
    pub const fn shape(&self) -> &DeclarationShape {
        &self.shape
    }

    /// The selectors with at least one declaration of this shape.
    #[must_use]
    pub const fn support(&self) -> &Support {
        &self.support
    }

    /// Number of supporting selectors.
    #[must_use]
    pub fn support_size(&self) -> usize {
        self.support.len()
    }

    /// Every declaration of this shape, in document order.
    #[must_use]
    pub fn occurrences(&self) -> &[DeclarationRef] {
        &self.occurrences
    }

    /// The first declaration of this shape in the document.
    #[must_use]
    pub fn representative(&self) -> DeclarationRef {
        self.occurrences[0]
    }

    /// Resolve the representative declaration in `stylesheet`.
    #[must_use]
    pub fn declaration<'a>(&self, stylesheet: &'a Stylesheet) -> Option<&'a Declaration> {
        let at = self.representative();
        stylesheet.get(at.selector)?.declarations.get(at.index)
    }

    /// The global item order: larger support first, then the shape's
    /// textual key.
    #[must_use]
    pub fn compare(&self, other: &Self) -> core::cmp::Ordering {
        other
            .support_size()
            .cmp(&self.support_size())
            .then_with(|| self.shape.cmp(&other.shape))
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl Eq for Item {}

impl core::hash::Hash for Item {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
    }
}

/// The frozen item ranking of one stylesheet.
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    /// Items in rank order; `items[i].id == ItemId(i)`.
    items: Vec<Item>,
    by_shape: HashMap<DeclarationShape, ItemId>,
    selector_count: usize,
}

impl ItemTable {
    /// Group every declaration of `stylesheet` into items and rank them.
    #[must_use]
    pub fn build(stylesheet: &Stylesheet) -> Self {
        struct Draft {
            shape: DeclarationShape,
            support: BTreeSet<SelectorId>,
            occurrences: Vec<DeclarationRef>,
        }

        let mut drafts: Vec<Draft> = Vec::new();
        let mut first_seen: HashMap<DeclarationShape, usize> = HashMap::new();

        for selector in stylesheet {
            for (index, declaration) in selector.declarations.iter().enumerate() {
                let shape = declaration.shape();
                let slot = *first_seen.entry(shape.clone()).or_insert_with(|| {
                    drafts.push(Draft {
                        shape,
                        support: BTreeSet::new(),
                        occurrences: Vec::new(),
                    });
                    drafts.len() - 1
                });
                let draft = &mut drafts[slot];
                let _ = draft.support.insert(selector.id);
                draft.occurrences.push(DeclarationRef {
                    selector: selector.id,
                    index,
                });
            }
        }

        drafts.sort_by(|a, b| {
            b.support
                .len()
                .cmp(&a.support.len())
                .then_with(|| a.shape.cmp(&b.shape))
        });

        let items: Vec<Item> = drafts
            .into_iter()
            .enumerate()
            .map(|(rank, draft)| Item {
                id: ItemId(rank),
                shape: draft.shape,
                support: draft.support.into_iter().collect(),
                occurrences: draft.occurrences,
            })
            .collect();
        let by_shape = items
            .iter()
            .map(|item| (item.shape.clone(), item.id))
            .collect();

        Self {
            items,
            by_shape,
            selector_count: stylesheet.len(),
        }
    }

    /// Get an item by id.
    ///
    /// # Panics
    /// Panics if `id` was not handed out by this table.
    #[must_use]
    pub fn get(&self, id: ItemId) -> &Item {
        &self.items[id.0]
    }

    /// Look up the item of a declaration shape.
    #[must_use]
    pub fn lookup(&self, shape: &DeclarationShape) -> Option<ItemId> {
        self.by_shape.get(shape).copied()
    }

    /// Iterate over items in rank order.
    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Items supported by at least `min_support` selectors, in rank order.
    ///
    /// Ranks are by support, so these are a prefix of the table.
    #[must_use]
    pub fn frequent(&self, min_support: usize) -> &[Item] {
        let end = self.items.partition_point(|item| item.support_size() >= min_support);
        &self.items[..end]
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stylesheet had no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selectors in the stylesheet the table was built from.
    #[must_use]
    pub const fn selector_count(&self) -> usize {
        self.selector_count
    }

    /// The support of the empty itemset.
    #[must_use]
    pub fn universe(&self) -> Support {
        Support::universe(self.selector_count)
    }
}

impl<'a> IntoIterator for &'a ItemTable {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use magpie_css::parse_stylesheet;

    use super::*;

    #[test]
    fn test_ranking_by_support_then_key() {
        let sheet = parse_stylesheet(
            ".a { margin: 0; color: red }\n\
             .b { color: red; padding: 0 }\n\
             .c { color: red; margin: 0px; padding: 0 }",
        );
        let table = ItemTable::build(&sheet);
        let keys: Vec<String> = table.iter().map(|i| i.shape().key()).collect();
        assert_eq!(
            keys,
            vec!["color: rgba(255, 0, 0, 1)", "margin: 0px", "padding: 0px"]
        );
        assert_eq!(table.get(ItemId(0)).support_size(), 3);
        assert!(table.iter().zip(table.iter().skip(1)).all(|(a, b)| a.compare(b).is_lt()));
    }

    #[test]
    fn test_repeated_declaration_counts_once_per_selector() {
        let sheet = parse_stylesheet(".a { color: red; color: #f00 } .b { color: red }");
        let table = ItemTable::build(&sheet);
        assert_eq!(table.len(), 1);
        let item = table.get(ItemId(0));
        assert_eq!(item.support_size(), 2);
        assert_eq!(item.occurrences().len(), 3);
        assert_eq!(item.representative(), DeclarationRef { selector: SelectorId(0), index: 0 });
        assert_eq!(item.declaration(&sheet).map(ToString::to_string).as_deref(), Some("color: red"));
    }

    #[test]
    fn test_frequent_prefix() {
        let sheet = parse_stylesheet(".a { color: red; top: 0 } .b { color: red }");
        let table = ItemTable::build(&sheet);
        assert_eq!(table.frequent(2).len(), 1);
        assert_eq!(table.frequent(3).len(), 0);
        assert_eq!(table.universe().len(), 2);
    }
}
