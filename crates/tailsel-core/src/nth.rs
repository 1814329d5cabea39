//! `nth-*` variant recognition
//!
//! Recognizes `nth-child-*`, `nth-of-type-*`, `nth-last-child-*` and
//! `nth-last-of-type-*` tokens and turns them into the matching structural
//! pseudo-class from
//! [Selectors Level 4 § 14.4](https://www.w3.org/TR/selectors-4/#child-index).
//!
//! Two token shapes are accepted:
//! - literal: `nth-child-3`, `nth-child-odd`, `nth-of-type-2n+1`
//! - arbitrary: `nth-child-[2n+3]`, `nth-last-child-[-n+4]`
//!
//! Both shapes share one formula grammar, see [`parse_nth_formula`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Priority shared by every `nth-*` modifier.
pub const NTH_PRIORITY: u8 = 11;

/// [CSS Syntax Level 3 § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// Coefficient (group 1, may be empty or a lone `-`) and signed offset (group 2).
static AN_PLUS_B: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d*)n([+-]\d+)?$").expect("An+B pattern is valid"));

/// The four child-indexed pseudo-class families.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NthKind {
    /// [§ 14.4.1 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    NthChild,
    /// [§ 14.5.1 :nth-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-of-type-pseudo)
    NthOfType,
    /// [§ 14.4.2 :nth-last-child()](https://www.w3.org/TR/selectors-4/#the-nth-last-child-pseudo)
    NthLastChild,
    /// [§ 14.5.2 :nth-last-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-last-of-type-pseudo)
    NthLastOfType,
}

impl NthKind {
    /// The token prefix for this family, including the trailing hyphen.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::NthChild => "nth-child-",
            Self::NthOfType => "nth-of-type-",
            Self::NthLastChild => "nth-last-child-",
            Self::NthLastOfType => "nth-last-of-type-",
        }
    }
}

/// A recognized `nth-*` modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NthModifier {
    /// Which child-indexed pseudo-class to emit.
    #[serde(rename = "type")]
    pub kind: NthKind,
    /// The validated formula text, brackets removed.
    pub formula: String,
    /// The token this modifier was parsed from.
    pub raw: String,
    /// Always [`NTH_PRIORITY`].
    pub priority: u8,
}

impl NthModifier {
    /// The `(a, b)` coefficients of this modifier's formula.
    #[must_use]
    pub fn coefficients(&self) -> Option<NthFormula> {
        parse_nth_formula(&self.formula)
    }
}

/// [CSS Syntax Level 3 § 6](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// "The An+B notation defines an integer step (A) and offset (B), and
/// represents the An+Bth elements in a list, for every positive integer or
/// zero value of n, with the first element in the list having index 1."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NthFormula {
    /// Step.
    pub a: i64,
    /// Offset.
    pub b: i64,
}

impl NthFormula {
    /// Whether the 1-based `position` is selected by `An+B` for some `n >= 0`.
    ///
    /// Position 0 is never selected; child indices start at 1.
    #[must_use]
    pub fn matches(self, position: u32) -> bool {
        if position == 0 {
            return false;
        }
        // i128 keeps `b - position` and `-a` clear of overflow for any i64 input.
        let (a, b, p) = (i128::from(self.a), i128::from(self.b), i128::from(position));
        match a {
            0 => p == b,
            a if a > 0 => p >= b && (p - b) % a == 0,
            a => p <= b && (b - p) % -a == 0,
        }
    }
}

/// Whether `token` is a well-formed `nth-*` modifier.
///
/// A token is an nth modifier exactly when [`parse_nth_modifier`] accepts it.
#[must_use]
pub fn is_nth_modifier(token: &str) -> bool {
    parse_nth_modifier(token).is_some()
}

/// Parse an `nth-*` token.
///
/// Tries each family prefix in turn; the remainder is either a literal
/// formula or a `[...]` arbitrary formula. Both are checked with
/// [`is_valid_nth_formula`]. Returns `None` for anything else.
#[must_use]
pub fn parse_nth_modifier(token: &str) -> Option<NthModifier> {
    NthKind::iter().find_map(|kind| {
        let rest = token.strip_prefix(kind.prefix())?;
        let formula = rest
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .unwrap_or(rest);

        is_valid_nth_formula(formula).then(|| NthModifier {
            kind,
            formula: formula.to_string(),
            raw: token.to_string(),
            priority: NTH_PRIORITY,
        })
    })
}

/// Formula validation shared by the literal and arbitrary token shapes.
///
/// Accepts `odd`, `even`, a non-negative integer, or `An+B` / `An-B` with an
/// optional (possibly negative) coefficient: `2n`, `2n+1`, `-n+5`, `n`.
#[must_use]
pub fn is_valid_nth_formula(formula: &str) -> bool {
    parse_nth_formula(formula).is_some()
}

/// Decompose a formula into `(a, b)` coefficients.
///
/// - `odd` → `(2, 1)`, `even` → `(2, 0)`
/// - `N` → `(0, N)`
/// - `An+B` → `(A, B)`, where a missing `A` means `1` and a lone `-` means `-1`
#[must_use]
pub fn parse_nth_formula(formula: &str) -> Option<NthFormula> {
    match formula {
        "odd" => return Some(NthFormula { a: 2, b: 1 }),
        "even" => return Some(NthFormula { a: 2, b: 0 }),
        _ => {}
    }

    if !formula.is_empty() && formula.bytes().all(|b| b.is_ascii_digit()) {
        return formula.parse().ok().map(|b| NthFormula { a: 0, b });
    }

    let captures = AN_PLUS_B.captures(formula)?;
    let a = match &captures[1] {
        "" => 1,
        "-" => -1,
        digits => digits.parse().ok()?,
    };
    let b = match captures.get(2) {
        // `i64::from_str` accepts a leading '+'.
        Some(offset) => offset.as_str().parse().ok()?,
        None => 0,
    };
    Some(NthFormula { a, b })
}

/// Whether `formula` selects the 1-based `position`.
///
/// Invalid formulas select nothing.
#[must_use]
pub fn matches_position(formula: &str, position: u32) -> bool {
    parse_nth_formula(formula).is_some_and(|f| f.matches(position))
}

/// Append the pseudo-class for `modifier` to `base_selector`.
///
/// Example: `nth-child` / `2n+1` on `.item` → `.item:nth-child(2n+1)`
#[must_use]
pub fn generate_nth_selector(modifier: &NthModifier, base_selector: &str) -> String {
    format!("{base_selector}:{}({})", modifier.kind, modifier.formula)
}
