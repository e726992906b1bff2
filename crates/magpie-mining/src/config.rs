//! Mining configuration.

use strum_macros::{Display, EnumString};

use crate::error::MiningError;

/// The smallest accepted minimum support.
pub const MIN_SUPPORT_FLOOR: usize = 2;

/// Which miner to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Algorithm {
    /// FP-Growth over a compressed prefix tree.
    #[default]
    FpGrowth,
    /// Level-wise candidate generation, the slower precursor.
    Apriori,
}

/// Parameters of one mining run.
///
/// Fields are public for struct-literal construction; the entry points
/// re-validate them, so an invalid literal is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningConfig {
    /// Minimum number of distinct selectors a pattern must occur in.
    pub min_support: usize,
    /// Keep only itemsets not subsumed by a larger itemset with the same
    /// support.
    pub remove_subsumed_subsets: bool,
    /// Enumerate single-path FP-trees directly instead of recursing.
    pub single_path_shortcut: bool,
}

impl MiningConfig {
    /// A configuration with the given threshold and default flags.
    ///
    /// # Errors
    /// Returns [`MiningError::MinSupportTooLow`] if `min_support < 2`.
    pub const fn new(min_support: usize) -> Result<Self, MiningError> {
        let config = Self {
            min_support,
            remove_subsumed_subsets: true,
            single_path_shortcut: true,
        };
        match config.validate() {
            Ok(()) => Ok(config),
            Err(e) => Err(e),
        }
    }

    /// Set whether subsumed subsets are removed from the results.
    #[must_use]
    pub const fn with_subsumed_subsets(mut self, remove: bool) -> Self {
        self.remove_subsumed_subsets = remove;
        self
    }

    /// Set whether the single-path shortcut is taken.
    #[must_use]
    pub const fn with_single_path_shortcut(mut self, enabled: bool) -> Self {
        self.single_path_shortcut = enabled;
        self
    }

    /// Check the preconditions of a mining run.
    ///
    /// # Errors
    /// Returns [`MiningError::MinSupportTooLow`] if `min_support < 2`.
    pub const fn validate(&self) -> Result<(), MiningError> {
        if self.min_support < MIN_SUPPORT_FLOOR {
            return Err(MiningError::MinSupportTooLow {
                min_support: self.min_support,
            });
        }
        Ok(())
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: MIN_SUPPORT_FLOOR,
            remove_subsumed_subsets: true,
            single_path_shortcut: true,
        }
    }
}
