//! A serializable view of mining results.
//!
//! Each result list becomes a [`ListReport`] holding its item sets, most
//! widely duplicated first. Item sets name their declarations as written at
//! their first occurrence and every selector that declares all of them.

use magpie_common::SourceLocation;
use magpie_css::Stylesheet;
use serde::Serialize;

use crate::itemset::ItemSet;
use crate::results::MiningResults;

/// The whole report of one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// The miner that ran.
    pub algorithm: String,
    /// The minimum support the run used.
    pub min_support: usize,
    /// Whether subsumed subsets were removed.
    pub remove_subsumed_subsets: bool,
    /// Number of selectors in the stylesheet.
    pub selectors: usize,
    /// Number of declarations in the stylesheet.
    pub declarations: usize,
    /// Number of distinct declaration shapes.
    pub items: usize,
    /// Result lists in ascending cardinality.
    pub lists: Vec<ListReport>,
    /// Warnings raised while reading and mining.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// The item sets of one cardinality.
#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    /// Members per item set.
    pub cardinality: usize,
    /// The largest support in this list.
    pub max_support: usize,
    /// Item sets by descending support, then by declaration text.
    pub itemsets: Vec<ItemSetReport>,
}

/// One duplicated group of declarations.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSetReport {
    /// Number of selectors declaring the whole group.
    pub support: usize,
    /// The group's declarations in canonical item order.
    pub declarations: Vec<DeclarationReport>,
    /// The selectors declaring the whole group, in document order.
    pub selectors: Vec<SelectorReport>,
}

/// A declaration as written at its first occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationReport {
    /// `property: values`, with `!important` if present.
    pub declaration: String,
    /// Where the first occurrence starts.
    pub location: SourceLocation,
}

/// A selector of a duplicated group.
#[derive(Debug, Clone, Serialize)]
pub struct SelectorReport {
    /// The selector list text.
    pub selector: String,
    /// The enclosing conditional group rules, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Where the selector starts.
    pub location: SourceLocation,
}

impl Report {
    /// Build the report of `results`, resolving items and selectors in
    /// `stylesheet`, which must be the stylesheet that was mined.
    #[must_use]
    pub fn new(results: &MiningResults, stylesheet: &Stylesheet) -> Self {
        let config = results.config();
        let lists = results
            .lists()
            .map(|list| {
                let mut itemsets: Vec<ItemSetReport> = list
                    .iter()
                    .map(|set| ItemSetReport::new(set, results, stylesheet))
                    .collect();
                itemsets.sort_by(|a, b| {
                    b.support
                        .cmp(&a.support)
                        .then_with(|| a.sort_key().cmp(&b.sort_key()))
                });
                ListReport {
                    cardinality: list.cardinality(),
                    max_support: list.max_support(),
                    itemsets,
                }
            })
            .collect();

        Self {
            algorithm: results.algorithm().to_string(),
            min_support: config.min_support,
            remove_subsumed_subsets: config.remove_subsumed_subsets,
            selectors: stylesheet.len(),
            declarations: stylesheet.declaration_count(),
            items: results.items().len(),
            lists,
            warnings: Vec::new(),
        }
    }

    /// Attach warnings to the report.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Total number of item sets across all lists.
    #[must_use]
    pub fn itemset_count(&self) -> usize {
        self.lists.iter().map(|list| list.itemsets.len()).sum()
    }
}

impl ItemSetReport {
    fn new(set: &ItemSet, results: &MiningResults, stylesheet: &Stylesheet) -> Self {
        let table = results.items();
        let declarations = set
            .items()
            .iter()
            .map(|id| {
                let item = table.get(*id);
                match item.declaration(stylesheet) {
                    Some(declaration) => DeclarationReport {
                        declaration: declaration.to_string(),
                        location: declaration.location,
                    },
                    None => DeclarationReport {
                        declaration: item.shape().key(),
                        location: SourceLocation::START,
                    },
                }
            })
            .collect();
        let selectors = set
            .support()
            .iter()
            .filter_map(|id| stylesheet.get(id))
            .map(|selector| SelectorReport {
                selector: selector.text.clone(),
                media: selector.media.clone(),
                location: selector.location,
            })
            .collect();

        Self {
            support: set.support_size(),
            declarations,
            selectors,
        }
    }

    fn sort_key(&self) -> String {
        self.declarations
            .iter()
            .map(|d| d.declaration.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
