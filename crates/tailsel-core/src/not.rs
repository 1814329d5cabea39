//! `not-*` variant recognition
//!
//! [Selectors Level 4 § 4.3 The Negation pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
//!
//! "The negation pseudo-class, :not(), is a functional pseudo-class taking a
//! selector list as an argument. It represents an element that is not
//! represented by its argument."
//!
//! Named tokens (`not-first`, `not-checked`, ...) come from a fixed table.
//! `not-[<selector>]` passes its payload through verbatim.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::generator::is_balanced;

/// Priority shared by every `not-*` modifier, named or arbitrary.
pub const NOT_PRIORITY: u8 = 12;

/// Named negation tokens and the selector each one emits.
pub const NOT_VARIANTS: &[(&str, &str)] = &[
    // Structural
    ("not-first", ":not(:first-child)"),
    ("not-last", ":not(:last-child)"),
    ("not-only", ":not(:only-child)"),
    ("not-first-child", ":not(:first-child)"),
    ("not-last-child", ":not(:last-child)"),
    ("not-only-child", ":not(:only-child)"),
    ("not-odd", ":not(:nth-child(odd))"),
    ("not-even", ":not(:nth-child(even))"),
    ("not-first-of-type", ":not(:first-of-type)"),
    ("not-last-of-type", ":not(:last-of-type)"),
    ("not-only-of-type", ":not(:only-of-type)"),
    ("not-empty", ":not(:empty)"),
    // Input
    ("not-disabled", ":not(:disabled)"),
    ("not-enabled", ":not(:enabled)"),
    ("not-checked", ":not(:checked)"),
    ("not-indeterminate", ":not(:indeterminate)"),
    ("not-required", ":not(:required)"),
    ("not-optional", ":not(:optional)"),
    ("not-valid", ":not(:valid)"),
    ("not-invalid", ":not(:invalid)"),
    ("not-read-only", ":not(:read-only)"),
    ("not-read-write", ":not(:read-write)"),
    // User action
    ("not-hover", ":not(:hover)"),
    ("not-focus", ":not(:focus)"),
    ("not-active", ":not(:active)"),
    ("not-visited", ":not(:visited)"),
];

static NOT_LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NOT_VARIANTS.iter().copied().collect());

/// A recognized negation modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotModifier {
    /// Always of the form `:not(...)`.
    pub negated_selector: String,
    /// The token this modifier was parsed from.
    pub raw: String,
    /// Always [`NOT_PRIORITY`].
    pub priority: u8,
}

/// Whether `token` is one of the named negation tokens.
///
/// Arbitrary `not-[...]` tokens are not part of the table; see
/// [`parse_arbitrary_not_modifier`].
#[must_use]
pub fn is_not_modifier(token: &str) -> bool {
    NOT_LOOKUP.contains_key(token)
}

/// Parse a negation token, named or arbitrary.
#[must_use]
pub fn parse_not_modifier(token: &str) -> Option<NotModifier> {
    match NOT_LOOKUP.get(token) {
        Some(negated) => Some(NotModifier {
            negated_selector: (*negated).to_string(),
            raw: token.to_string(),
            priority: NOT_PRIORITY,
        }),
        None => parse_arbitrary_not_modifier(token),
    }
}

/// Parse `not-[<selector>]`.
///
/// The payload is emitted verbatim inside `:not(...)`; the only check is that
/// it is non-empty. Use [`validate_not_syntax`] or
/// [`crate::generator::validate_selector`] before trusting it.
#[must_use]
pub fn parse_arbitrary_not_modifier(token: &str) -> Option<NotModifier> {
    let inner = token.strip_prefix("not-[")?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(NotModifier {
        negated_selector: format!(":not({inner})"),
        raw: token.to_string(),
        priority: NOT_PRIORITY,
    })
}

/// Advisory shape check for a negation token.
///
/// Named tokens must be in the table. Arbitrary tokens must have a non-empty
/// payload with balanced `()` and `[]` and no unescaped `{`, `}` or `;`
/// (which would break out of the selector).
#[must_use]
pub fn validate_not_syntax(token: &str) -> bool {
    if is_not_modifier(token) {
        return true;
    }
    let Some(inner) = token
        .strip_prefix("not-[")
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return false;
    };
    !inner.is_empty() && is_balanced(inner, true)
}

/// Append the negation to `base_selector`.
#[must_use]
pub fn generate_not_selector(modifier: &NotModifier, base_selector: &str) -> String {
    format!("{base_selector}{}", modifier.negated_selector)
}
