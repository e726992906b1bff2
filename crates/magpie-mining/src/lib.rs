//! Duplicated-declaration mining for Magpie.
//!
//! Finds groups of declarations that several selectors declare, exactly or
//! equivalently, so that they can be merged into a grouped selector or a
//! mixin. Declarations become items through their canonical shape
//! ([`magpie_css::DeclarationShape`]); each selector becomes a transaction;
//! frequent item sets are mined with FP-Growth (or Apriori) and reported per
//! cardinality, optionally keeping only sets no larger set explains.
//!
//! # Pipeline
//!
//! 1. [`ItemTable::build`]: one pass over the stylesheet, items ranked by
//!    descending support with ties broken by the shape's textual key.
//! 2. [`DataSet::build`]: a second pass, one transaction per selector.
//! 3. [`fpgrowth::mine`] or [`apriori::mine`] into [`ItemSetLists`].
//!
//! # Example
//!
//! ```
//! use magpie_css::parse_stylesheet;
//! use magpie_mining::{MiningConfig, find_duplicates};
//!
//! let sheet = parse_stylesheet(".a { color: red } .b { color: #f00 }");
//! let results = find_duplicates(&sheet, &MiningConfig::default()).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results.max_support(), 2);
//! ```

/// Apriori, the level-wise miner.
pub mod apriori;
/// Mining configuration.
pub mod config;
/// Transactions.
pub mod dataset;
/// Mining errors.
pub mod error;
/// FP-Growth.
pub mod fpgrowth;
/// Arena-based FP-tree.
pub mod fptree;
/// Items and the frozen item ranking.
pub mod item;
/// Item sets.
pub mod itemset;
/// Result lists and subsumed-subset removal.
pub mod itemset_list;
/// Serializable report.
pub mod report;
/// Mining results.
pub mod results;
/// Support sets.
pub mod support;

use magpie_css::Stylesheet;

pub use config::{Algorithm, MiningConfig};
pub use dataset::{DataSet, Transaction};
pub use error::MiningError;
pub use item::{Item, ItemId, ItemTable};
pub use itemset::ItemSet;
pub use itemset_list::{ItemSetList, ItemSetLists};
pub use report::Report;
pub use results::MiningResults;
pub use support::Support;

/// Mine `stylesheet` for duplicated declarations with FP-Growth.
///
/// # Errors
/// Returns [`MiningError::MinSupportTooLow`] if `config.min_support < 2`.
pub fn find_duplicates(
    stylesheet: &Stylesheet,
    config: &MiningConfig,
) -> Result<MiningResults, MiningError> {
    find_duplicates_with(stylesheet, config, Algorithm::FpGrowth)
}

/// Mine `stylesheet` for duplicated declarations with the given miner.
///
/// # Errors
/// Returns [`MiningError::MinSupportTooLow`] if `config.min_support < 2`.
pub fn find_duplicates_with(
    stylesheet: &Stylesheet,
    config: &MiningConfig,
    algorithm: Algorithm,
) -> Result<MiningResults, MiningError> {
    config.validate()?;

    let table = ItemTable::build(stylesheet);
    let dataset = DataSet::build(stylesheet, &table, config.min_support);
    let mut lists = ItemSetLists::new(config.min_support, config.remove_subsumed_subsets);

    if !dataset.is_empty() {
        match algorithm {
            Algorithm::FpGrowth => fpgrowth::mine(&dataset, &table, config, &mut lists),
            Algorithm::Apriori => apriori::mine(&dataset, &table, config, &mut lists),
        }
    }

    Ok(MiningResults::new(table, lists, *config, algorithm))
}
