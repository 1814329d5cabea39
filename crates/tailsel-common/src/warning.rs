//! Advisory warnings with colored terminal output.
//!
//! Provides deduplication so that a class list repeating the same suspicious
//! arbitrary value only reports it once. The library crates never call into
//! this module; they hand diagnostics back to the caller, and the binary
//! decides what to print.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Build the deduplication key and display text for a warning.
#[must_use]
pub fn format_warning(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a suspicious input (prints once per unique message)
///
/// # Example
/// ```
/// use tailsel_common::warning::warn_once;
///
/// warn_once("variants", "arbitrary selector '[&&]' failed the sanity check");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format_warning(component, message);
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!(
            "{}",
            format!("[tailsel {component}] ⚠ {message}").yellow()
        );
    }
}

/// Whether `warn_once` has already reported this exact message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&format_warning(component, message)))
}

/// Clear all recorded warnings (call between independent runs)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
