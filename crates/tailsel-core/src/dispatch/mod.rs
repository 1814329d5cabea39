//! Token splitting and family dispatch
//!
//! A utility class such as `md:group-hover:not-first:bg-blue-500` is split
//! into variant tokens (`md`, `group-hover`, `not-first`) and the utility
//! (`bg-blue-500`). Each token is then offered to the recognizers in
//! [`RECOGNIZERS`] order; the first one that parses it wins.
//!
//! Recognizer vocabularies are disjoint, so the order never changes which
//! family claims a token. It is fixed anyway so classification is
//! deterministic if a vocabulary grows.

pub mod resolver;

use crate::generator::is_balanced;
use crate::group_peer::{is_group_peer_modifier, parse_group_peer_modifier};
use crate::modifier::{Modifier, ModifierFamily};
use crate::not::parse_not_modifier;
use crate::nth::{is_nth_modifier, parse_nth_modifier};
use crate::special::{is_special_modifier, parse_special_modifier};

/// One recognizer family: a classification predicate plus a parser.
pub trait Recognizer: Sync {
    /// The family this recognizer produces.
    fn family(&self) -> ModifierFamily;

    /// Parse `token`, or `None` if it is not in this family.
    fn recognize(&self, token: &str) -> Option<Modifier>;

    /// Whether `token` is in this family.
    fn is_match(&self, token: &str) -> bool {
        self.recognize(token).is_some()
    }
}

/// `nth-*` tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct NthRecognizer;

impl Recognizer for NthRecognizer {
    fn family(&self) -> ModifierFamily {
        ModifierFamily::Nth
    }

    fn recognize(&self, token: &str) -> Option<Modifier> {
        parse_nth_modifier(token).map(Modifier::Nth)
    }

    fn is_match(&self, token: &str) -> bool {
        is_nth_modifier(token)
    }
}

/// `not-*` tokens, named and arbitrary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotRecognizer;

impl Recognizer for NotRecognizer {
    fn family(&self) -> ModifierFamily {
        ModifierFamily::Not
    }

    fn recognize(&self, token: &str) -> Option<Modifier> {
        parse_not_modifier(token).map(Modifier::Not)
    }
}

/// Bare special tokens and `supports-*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialRecognizer;

impl Recognizer for SpecialRecognizer {
    fn family(&self) -> ModifierFamily {
        ModifierFamily::Special
    }

    fn recognize(&self, token: &str) -> Option<Modifier> {
        parse_special_modifier(token).map(Modifier::Special)
    }

    fn is_match(&self, token: &str) -> bool {
        is_special_modifier(token)
    }
}

/// `group`, `peer` and their state forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupPeerRecognizer;

impl Recognizer for GroupPeerRecognizer {
    fn family(&self) -> ModifierFamily {
        ModifierFamily::GroupPeer
    }

    fn recognize(&self, token: &str) -> Option<Modifier> {
        parse_group_peer_modifier(token).map(Modifier::GroupPeer)
    }

    fn is_match(&self, token: &str) -> bool {
        is_group_peer_modifier(token)
    }
}

/// The fixed dispatch order.
pub static RECOGNIZERS: [&dyn Recognizer; 4] = [
    &NthRecognizer,
    &NotRecognizer,
    &SpecialRecognizer,
    &GroupPeerRecognizer,
];

/// Classify and parse a single variant token.
#[must_use]
pub fn classify(token: &str) -> Option<Modifier> {
    RECOGNIZERS
        .iter()
        .find_map(|recognizer| recognizer.recognize(token))
}

/// The family that claims `token`, without building the modifier.
#[must_use]
pub fn classify_family(token: &str) -> Option<ModifierFamily> {
    RECOGNIZERS
        .iter()
        .find(|recognizer| recognizer.is_match(token))
        .map(|recognizer| recognizer.family())
}

/// Split a utility class into its variant tokens and the utility.
///
/// Only `:` outside `[...]` and `(...)` separates tokens, so arbitrary
/// payloads such as `not-[:hover]` stay intact.
///
/// ```
/// use tailsel_core::dispatch::split_class;
///
/// let (variants, utility) = split_class("md:not-[:hover]:bg-blue-500");
/// assert_eq!(variants, ["md", "not-[:hover]"]);
/// assert_eq!(utility, "bg-blue-500");
/// ```
#[must_use]
pub fn split_class(class: &str) -> (Vec<&str>, &str) {
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut variants = Vec::new();
    let mut start = 0usize;

    for (idx, ch) in class.char_indices() {
        match ch {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            ':' if paren_depth == 0 && bracket_depth == 0 => {
                variants.push(&class[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    (variants, &class[start..])
}

/// Whether every `[` and `(` in `class` is closed in order.
///
/// Unlike the selector check, braces and semicolons are allowed here since
/// arbitrary utility values may carry them (`content-['{']`).
#[must_use]
pub fn brackets_balanced(class: &str) -> bool {
    is_balanced(class, false)
}
