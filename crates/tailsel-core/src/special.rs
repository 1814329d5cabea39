//! Miscellaneous and feature-query variant recognition
//!
//! Two disjoint vocabularies:
//! - bare tokens (`noscript`, `starting`, `pointer-*`, `any-pointer-*`,
//!   `user-valid`, `user-invalid`, `inverted-colors`)
//! - `supports-*` feature queries, named or arbitrary (`supports-[display:grid]`)
//!
//! Every modifier carries either nothing (selector rewrite), a media-feature
//! condition, a `@supports` condition, or, for `user-valid`/`user-invalid`,
//! a pseudo-class written into the condition slot. Callers distinguish the
//! last case by its leading `:`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Priority of the `noscript` modifier.
pub const NOSCRIPT_PRIORITY: u8 = 20;
/// Priority of the `starting` modifier.
pub const STARTING_PRIORITY: u8 = 21;
/// Priority of every `supports-*` modifier.
pub const SUPPORTS_PRIORITY: u8 = 22;

/// Ancestor marker used by `noscript`.
pub const NOSCRIPT_ANCESTOR: &str = "html.no-js";

/// Suffix used by `starting`: matches only while the element is at rest.
pub const STARTING_SUFFIX: &str = ":where(:not(:focus):not(:active):not(:hover))";

/// [CSS Conditional Rules Level 3 § 6.1](https://www.w3.org/TR/css-conditional-3/#supports_rule)
///
/// A `<supports-decl>` is `( <declaration> )`; we check the inside only.
static SUPPORTS_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?-?[A-Za-z][A-Za-z0-9-]*\s*:\s*\S.*$").expect("supports pattern is valid")
});

/// What shape a special modifier takes in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SpecialKind {
    /// Prefix with the no-JavaScript ancestor class.
    Noscript,
    /// Append the at-rest approximation of `@starting-style`.
    Starting,
    /// Wrap in `@supports`.
    Supports,
    /// Wrap in `@media`, or append when the condition is a pseudo-class.
    MediaFeature,
}

/// Configuration row for a bare special token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpecialConfig {
    kind: SpecialKind,
    priority: u8,
}

/// Bare tokens: `(token, kind, priority)`.
pub const SPECIAL_VARIANTS: &[(&str, SpecialKind, u8)] = &[
    ("noscript", SpecialKind::Noscript, NOSCRIPT_PRIORITY),
    ("starting", SpecialKind::Starting, STARTING_PRIORITY),
    ("pointer-fine", SpecialKind::MediaFeature, 15),
    ("pointer-coarse", SpecialKind::MediaFeature, 15),
    ("pointer-none", SpecialKind::MediaFeature, 15),
    ("any-pointer-fine", SpecialKind::MediaFeature, 16),
    ("any-pointer-coarse", SpecialKind::MediaFeature, 16),
    ("any-pointer-none", SpecialKind::MediaFeature, 16),
    ("user-valid", SpecialKind::MediaFeature, 16),
    ("user-invalid", SpecialKind::MediaFeature, 16),
    ("inverted-colors", SpecialKind::MediaFeature, 16),
];

/// [Media Queries Level 4 § 7 Interaction Media Features](https://www.w3.org/TR/mediaqueries-4/#mf-interaction)
/// and [Media Queries Level 5 § 6.4 inverted-colors](https://www.w3.org/TR/mediaqueries-5/#inverted).
///
/// `user-valid` / `user-invalid` are pseudo-classes
/// ([Selectors Level 4 § 13.3](https://www.w3.org/TR/selectors-4/#user-pseudos)),
/// not media features, and keep their leading colon.
pub const MEDIA_FEATURE_CONDITIONS: &[(&str, &str)] = &[
    ("pointer-fine", "pointer: fine"),
    ("pointer-coarse", "pointer: coarse"),
    ("pointer-none", "pointer: none"),
    ("any-pointer-fine", "any-pointer: fine"),
    ("any-pointer-coarse", "any-pointer: coarse"),
    ("any-pointer-none", "any-pointer: none"),
    ("user-valid", ":user-valid"),
    ("user-invalid", ":user-invalid"),
    ("inverted-colors", "inverted-colors: inverted"),
];

/// Named `supports-*` tokens and their declaration condition.
pub const SUPPORTS_FEATURES: &[(&str, &str)] = &[
    ("supports-display-grid", "display: grid"),
    ("supports-display-flex", "display: flex"),
    ("supports-display-contents", "display: contents"),
    ("supports-position-sticky", "position: sticky"),
    ("supports-backdrop-filter", "backdrop-filter: blur(0)"),
    ("supports-aspect-ratio", "aspect-ratio: 1 / 1"),
    ("supports-container-queries", "container-type: inline-size"),
];

static SPECIAL_LOOKUP: LazyLock<HashMap<&'static str, SpecialConfig>> = LazyLock::new(|| {
    SPECIAL_VARIANTS
        .iter()
        .map(|&(token, kind, priority)| (token, SpecialConfig { kind, priority }))
        .collect()
});

static MEDIA_LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| MEDIA_FEATURE_CONDITIONS.iter().copied().collect());

static SUPPORTS_LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SUPPORTS_FEATURES.iter().copied().collect());

/// A recognized special modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialModifier {
    /// Output shape.
    #[serde(rename = "type")]
    pub kind: SpecialKind,
    /// Present for `supports` and `media-feature`. Starts with `:` for the
    /// pseudo-class shaped media-feature tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// The token this modifier was parsed from.
    pub raw: String,
    /// See the priority constants and [`SPECIAL_VARIANTS`].
    pub priority: u8,
}

impl SpecialModifier {
    /// Whether the condition is a pseudo-class rather than a media feature.
    #[must_use]
    pub fn has_pseudo_class_condition(&self) -> bool {
        self.condition.as_deref().is_some_and(|c| c.starts_with(':'))
    }
}

/// Whether `token` belongs to either special vocabulary.
#[must_use]
pub fn is_special_modifier(token: &str) -> bool {
    SPECIAL_LOOKUP.contains_key(token) || parse_supports_modifier(token).is_some()
}

/// Parse a bare special token or a `supports-*` token.
#[must_use]
pub fn parse_special_modifier(token: &str) -> Option<SpecialModifier> {
    let Some(config) = SPECIAL_LOOKUP.get(token) else {
        return parse_supports_modifier(token);
    };

    let condition = match config.kind {
        SpecialKind::MediaFeature => get_media_feature_condition(token).map(str::to_string),
        _ => None,
    };

    Some(SpecialModifier {
        kind: config.kind,
        condition,
        raw: token.to_string(),
        priority: config.priority,
    })
}

/// Parse `supports-<named>` or `supports-[<condition>]`.
///
/// Arbitrary conditions must pass [`validate_supports_condition`]; a
/// malformed payload is "not a supports token" rather than garbage output.
#[must_use]
pub fn parse_supports_modifier(token: &str) -> Option<SpecialModifier> {
    let condition = if let Some(named) = SUPPORTS_LOOKUP.get(token) {
        (*named).to_string()
    } else {
        let inner = token.strip_prefix("supports-[")?.strip_suffix(']')?;
        if !validate_supports_condition(inner) {
            return None;
        }
        inner.to_string()
    };

    Some(SpecialModifier {
        kind: SpecialKind::Supports,
        condition: Some(condition),
        raw: token.to_string(),
        priority: SUPPORTS_PRIORITY,
    })
}

/// The media-feature condition (or pseudo-class) for a bare token.
#[must_use]
pub fn get_media_feature_condition(token: &str) -> Option<&'static str> {
    MEDIA_LOOKUP.get(token).copied()
}

/// Advisory check that `condition` has the `property: value` shape.
#[must_use]
pub fn validate_supports_condition(condition: &str) -> bool {
    SUPPORTS_DECLARATION.is_match(condition)
}

/// Apply a special modifier to `selector`.
///
/// - `noscript` → `html.no-js <selector>`
/// - `starting` → `<selector>:where(:not(:focus):not(:active):not(:hover))`
/// - `supports` → `@supports (<condition>) { <selector> }`
/// - `media-feature` → `<selector><condition>` for a pseudo-class condition,
///   otherwise `@media (<condition>) { <selector> }`
///
/// A wrapping kind with no condition leaves `selector` untouched.
#[must_use]
pub fn generate_special_selector(modifier: &SpecialModifier, selector: &str) -> String {
    match (modifier.kind, modifier.condition.as_deref()) {
        (SpecialKind::Noscript, _) => format!("{NOSCRIPT_ANCESTOR} {selector}"),
        (SpecialKind::Starting, _) => format!("{selector}{STARTING_SUFFIX}"),
        (SpecialKind::Supports, Some(condition)) => {
            format!("@supports ({condition}) {{ {selector} }}")
        }
        (SpecialKind::MediaFeature, Some(condition)) if condition.starts_with(':') => {
            format!("{selector}{condition}")
        }
        (SpecialKind::MediaFeature, Some(condition)) => {
            format!("@media ({condition}) {{ {selector} }}")
        }
        (SpecialKind::Supports | SpecialKind::MediaFeature, None) => selector.to_string(),
    }
}
