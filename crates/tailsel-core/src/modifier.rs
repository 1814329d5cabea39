//! The modifier sum type shared by all recognizer families.

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::group_peer::{GroupPeerModifier, generate_group_peer_selector};
use crate::not::{NotModifier, generate_not_selector};
use crate::nth::{NthModifier, generate_nth_selector};
use crate::special::{SpecialKind, SpecialModifier, generate_special_selector};

/// Recognizer families, in dispatch order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ModifierFamily {
    /// `nth-child-*`, `nth-of-type-*`, ...
    Nth,
    /// `not-*`
    Not,
    /// `noscript`, `starting`, pointer and `supports-*` tokens
    Special,
    /// `group`, `peer` and their state forms
    GroupPeer,
}

/// Any classified modifier token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum Modifier {
    /// See [`crate::group_peer`].
    GroupPeer(GroupPeerModifier),
    /// See [`crate::not`].
    Not(NotModifier),
    /// See [`crate::nth`].
    Nth(NthModifier),
    /// See [`crate::special`].
    Special(SpecialModifier),
}

impl Modifier {
    /// Which family recognized this modifier.
    #[must_use]
    pub const fn family(&self) -> ModifierFamily {
        match self {
            Self::GroupPeer(_) => ModifierFamily::GroupPeer,
            Self::Not(_) => ModifierFamily::Not,
            Self::Nth(_) => ModifierFamily::Nth,
            Self::Special(_) => ModifierFamily::Special,
        }
    }

    /// Application priority; lower values are applied first.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::GroupPeer(m) => m.priority,
            Self::Not(m) => m.priority,
            Self::Nth(m) => m.priority,
            Self::Special(m) => m.priority,
        }
    }

    /// The source token.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::GroupPeer(m) => &m.raw,
            Self::Not(m) => &m.raw,
            Self::Nth(m) => &m.raw,
            Self::Special(m) => &m.raw,
        }
    }

    /// The at-rule prefix this modifier wraps in, if it wraps rather than
    /// shaping the selector text.
    ///
    /// `supports-display-grid` → `@supports (display: grid)`,
    /// `pointer-coarse` → `@media (pointer: coarse)`. Pseudo-class shaped
    /// media-feature tokens (`user-valid`) append and return `None`.
    #[must_use]
    pub fn at_rule(&self) -> Option<String> {
        let Self::Special(special) = self else {
            return None;
        };
        let condition = special.condition.as_deref()?;
        match special.kind {
            SpecialKind::Supports => Some(format!("@supports ({condition})")),
            SpecialKind::MediaFeature if !condition.starts_with(':') => {
                Some(format!("@media ({condition})"))
            }
            _ => None,
        }
    }

    /// Apply this modifier to `selector` with its family's generator.
    #[must_use]
    pub fn apply(&self, selector: &str) -> String {
        match self {
            Self::GroupPeer(m) => generate_group_peer_selector(m, selector),
            Self::Not(m) => generate_not_selector(m, selector),
            Self::Nth(m) => generate_nth_selector(m, selector),
            Self::Special(m) => generate_special_selector(m, selector),
        }
    }
}

// `at_rule` and `apply` must agree for wrapping modifiers.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::wrap_in_at_rule;
    use crate::special::parse_special_modifier;

    #[test]
    fn test_at_rule_matches_generated_wrapper() {
        for token in ["supports-display-grid", "pointer-coarse", "inverted-colors"] {
            let modifier = Modifier::Special(parse_special_modifier(token).unwrap());
            let at_rule = modifier.at_rule().unwrap();
            assert_eq!(modifier.apply(".x"), wrap_in_at_rule(&at_rule, ".x"));
        }
    }

    #[test]
    fn test_pseudo_condition_is_not_an_at_rule() {
        let modifier = Modifier::Special(parse_special_modifier("user-invalid").unwrap());
        assert_eq!(modifier.at_rule(), None);
        assert_eq!(modifier.apply(".field"), ".field:user-invalid");
    }
}
