//! Magpie warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the stylesheet reader, the value normalizer and the miner to report
//! input they had to skip or paths they could not take.

use std::sync::Mutex;

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Warnings already printed, in first-seen order.
static WARNED: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Warn about skipped input or a degraded path (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("CSS", "skipped declaration without a value at 3:5");
/// ```
///
/// # Panics
/// Panics if the global warning list mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = {
        let mut warned = WARNED.lock().unwrap();
        if warned.contains(&key) {
            false
        } else {
            warned.push(key);
            true
        }
    };

    if should_print {
        eprintln!("{YELLOW}[Magpie {component}] ⚠ {message}{RESET}");
    }
}

/// Drain every warning recorded so far, in the order they were first raised.
///
/// Used by the CLI to attach warnings to a machine-readable report. After this
/// call the same messages will print again if raised.
///
/// # Panics
/// Panics if the global warning list mutex is poisoned.
#[must_use]
pub fn take_warnings() -> Vec<String> {
    std::mem::take(&mut *WARNED.lock().unwrap())
}

/// Clear all recorded warnings (call when loading a new stylesheet)
///
/// # Panics
/// Panics if the global warning list mutex is poisoned.
pub fn clear_warnings() {
    WARNED.lock().unwrap().clear();
}
