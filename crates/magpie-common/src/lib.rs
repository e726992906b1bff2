//! Common utilities for the Magpie duplication miner.
//!
//! This crate provides shared infrastructure used by all Magpie components:
//! - **Warning System** - colored terminal output for skipped input and
//!   degraded mining paths
//! - **Source Locations** - line/column positions into stylesheet text

/// Line/column positions into stylesheet source text.
pub mod location;
/// Deduplicated warnings printed to stderr.
pub mod warning;

pub use location::SourceLocation;
