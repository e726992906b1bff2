//! Transactions: each selector's distinct items in canonical order.

use magpie_css::{SelectorId, Stylesheet};

use crate::item::{ItemId, ItemTable};

/// One selector's basket of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The selector this transaction stands for.
    pub selector: SelectorId,
    /// Distinct frequent items, sorted by rank.
    pub items: Vec<ItemId>,
}

/// The transactions of one stylesheet at one minimum support.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    transactions: Vec<Transaction>,
}

impl DataSet {
    /// Build one transaction per selector from the frozen item ranking.
    ///
    /// This is a second pass over the stylesheet: `table` must already hold
    /// every item with its final support. Items supported by fewer than
    /// `min_support` selectors can never be part of a result and are left
    /// out, and selectors left with no items get no transaction.
    #[must_use]
    pub fn build(stylesheet: &Stylesheet, table: &ItemTable, min_support: usize) -> Self {
        let transactions = stylesheet
            .iter()
            .filter_map(|selector| {
                let mut items: Vec<ItemId> = selector
                    .declarations
                    .iter()
                    .filter_map(|declaration| table.lookup(&declaration.shape()))
                    .filter(|id| table.get(*id).support_size() >= min_support)
                    .collect();
                items.sort_unstable();
                items.dedup();
                (!items.is_empty()).then_some(Transaction {
                    selector: selector.id,
                    items,
                })
            })
            .collect();
        Self { transactions }
    }

    /// The transactions in document order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Iterate over the transactions in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// Number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if no selector contributed a frequent item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The distinct items occurring in any transaction, in rank order.
    #[must_use]
    pub fn items(&self) -> Vec<ItemId> {
        let mut items: Vec<ItemId> = self
            .transactions
            .iter()
            .flat_map(|t| t.items.iter().copied())
            .collect();
        items.sort_unstable();
        items.dedup();
        items
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Transaction;
    type IntoIter = core::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

#[cfg(test)]
mod tests {
    use magpie_css::parse_stylesheet;

    use super::*;

    #[test]
    fn test_transactions_are_ranked_and_filtered() {
        let sheet = parse_stylesheet(
            ".a { top: 0; color: red; color: #f00 }\n\
             .b { color: red; top: 0px }\n\
             .c { color: red; left: 1px }\n\
             .d { }",
        );
        let table = ItemTable::build(&sheet);
        let data = DataSet::build(&sheet, &table, 2);

        // color (3) ranks before top (2); left (1) is infrequent; .d is empty.
        assert_eq!(data.len(), 3);
        assert_eq!(data.transactions()[0].items, vec![ItemId(0), ItemId(1)]);
        assert_eq!(data.transactions()[1].items, vec![ItemId(0), ItemId(1)]);
        assert_eq!(data.transactions()[2].items, vec![ItemId(0)]);
        assert_eq!(data.transactions()[2].selector, SelectorId(2));
        assert_eq!(data.items(), vec![ItemId(0), ItemId(1)]);
    }

    #[test]
    fn test_nothing_frequent() {
        let sheet = parse_stylesheet(".a { color: red; margin: 0 }");
        let table = ItemTable::build(&sheet);
        assert!(DataSet::build(&sheet, &table, 2).is_empty());
    }
}
