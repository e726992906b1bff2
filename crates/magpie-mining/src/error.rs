//! Errors returned by the mining entry points.

use thiserror::Error;

/// A rejected mining request.
///
/// Mining itself cannot fail on a valid configuration: an empty stylesheet or
/// one without duplicates yields empty results, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MiningError {
    /// The minimum support is below 2. A pattern declared by a single
    /// selector is never a duplicate.
    #[error("minimum support must be at least {floor} selectors, got {min_support}", floor = crate::config::MIN_SUPPORT_FLOOR)]
    MinSupportTooLow {
        /// The rejected threshold.
        min_support: usize,
    },
}
