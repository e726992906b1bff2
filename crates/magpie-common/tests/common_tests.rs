//! Integration tests for the shared utilities.

use magpie_common::SourceLocation;
use magpie_common::warning::{clear_warnings, take_warnings, warn_once};

#[test]
fn test_location_advances_columns() {
    let loc = SourceLocation::START.advance('a').advance('b');
    assert_eq!(loc, SourceLocation::new(2, 1, 3));
}

#[test]
fn test_location_newline_resets_column() {
    let loc = SourceLocation::START.advance('a').advance('\n').advance('b');
    assert_eq!(loc.line, 2);
    assert_eq!(loc.column, 2);
    assert_eq!(loc.offset, 3);
}

#[test]
fn test_location_display() {
    assert_eq!(SourceLocation::new(10, 4, 7).to_string(), "4:7");
}

#[test]
fn test_location_orders_by_offset() {
    let first = SourceLocation::new(3, 1, 4);
    let second = SourceLocation::new(20, 2, 1);
    assert!(first < second);
}

// Warnings live in one process-wide list, so every assertion about it stays in
// a single test to avoid interference between parallel test threads.
#[test]
fn test_warnings_are_deduplicated_and_drained() {
    clear_warnings();
    warn_once("Test", "first");
    warn_once("Test", "second");
    warn_once("Test", "first");

    let warnings = take_warnings();
    assert_eq!(warnings, vec!["[Test] first", "[Test] second"]);

    // Draining resets deduplication.
    warn_once("Test", "first");
    assert_eq!(take_warnings(), vec!["[Test] first"]);

    warn_once("Test", "third");
    clear_warnings();
    assert!(take_warnings().is_empty());
}
