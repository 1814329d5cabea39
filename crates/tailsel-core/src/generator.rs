//! Selector composition
//!
//! Turns a base selector plus an aggregate of already-classified modifiers
//! into the final selector text, optionally nested in `@media`, `@supports`
//! or `@container` blocks.
//!
//! # Pipeline
//!
//! Composition is a left fold over [`PIPELINE`]. Each stage either appends to
//! the selector text or wraps everything produced so far:
//!
//! ```text
//! base ─▶ pseudo-element ─▶ state ─▶ aria ─▶ data ─▶ container ─▶ motion ─▶ responsive
//!          (append)        (both)  (append) (append)   (wrap)      (wrap)     (wrap)
//! ```
//!
//! Responsive breakpoints therefore always end up as the outermost layer.
//!
//! The per-family `generate_*` helpers are re-exported here so callers can
//! depend on a single composition surface.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub use crate::group_peer::generate_group_peer_selector;
pub use crate::not::generate_not_selector;
pub use crate::nth::generate_nth_selector;
pub use crate::special::generate_special_selector;

/// Characters a selector may contain for [`validate_selector`] to accept it.
static SELECTOR_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[A-Za-z0-9_\-.#:\[\]()=~^$*|+>,\s"'@\\%/!&\x{80}-\x{10FFFF}]+$"#)
        .expect("selector charset pattern is valid")
});

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    #[default]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A selector of the form 'A + B' represents an element B that
    /// immediately follows element A, where A and B share the same parent."
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A selector of the form 'A ~ B' represents an element B that follows
    /// element A (not necessarily immediately)."
    SubsequentSibling,
}

impl Combinator {
    /// The bare combinator token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => ">",
            Self::NextSibling => "+",
            Self::SubsequentSibling => "~",
        }
    }

    /// The combinator with surrounding whitespace, as it is usually written.
    #[must_use]
    pub const fn padded(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::NextSibling => " + ",
            Self::SubsequentSibling => " ~ ",
        }
    }
}

/// The aggregate of modifiers for one utility class.
///
/// All values are complete CSS fragments: at-rule prefixes for the wrapping
/// fields, pseudo-class / attribute text for the appending ones. Maps keep
/// insertion order, which is also their application order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedModifiers {
    /// Breakpoint name → `@media ...` prefix.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub responsive: IndexMap<String, String>,
    /// Container name → `@container ...` prefix.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub container: IndexMap<String, String>,
    /// A single `@media (prefers-reduced-motion: ...)` prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<String>,
    /// Pseudo-classes to append and `@media`/`@supports` prefixes to wrap in,
    /// processed strictly in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<String>,
    /// A single `::`-prefixed pseudo-element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo_element: Option<String>,
    /// Attribute name → `[aria-...]` selector.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub aria: IndexMap<String, String>,
    /// Attribute name → `[data-...]` selector.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub data: IndexMap<String, String>,
}

impl ParsedModifiers {
    /// Whether no field is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        PIPELINE.iter().all(|stage| !(stage.applies)(self))
    }
}

/// Input to [`generate_selector`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorContext {
    /// Selector the modifiers are applied to, usually `.<escaped class>`.
    pub base_selector: String,
    /// The modifiers to apply.
    #[serde(default)]
    pub modifiers: ParsedModifiers,
    /// The full utility class the selector is generated for.
    #[serde(default)]
    pub class_name: String,
}

impl SelectorContext {
    /// Context for an explicit base selector.
    #[must_use]
    pub fn new(base_selector: impl Into<String>, modifiers: ParsedModifiers) -> Self {
        Self {
            base_selector: base_selector.into(),
            modifiers,
            class_name: String::new(),
        }
    }

    /// Context whose base selector is the escaped class selector for `class_name`.
    ///
    /// `md:hover:bg-blue-500` → `.md\:hover\:bg-blue-500`
    #[must_use]
    pub fn for_class(class_name: impl Into<String>, modifiers: ParsedModifiers) -> Self {
        let class_name = class_name.into();
        Self {
            base_selector: format!(".{}", escape_selector(&class_name)),
            modifiers,
            class_name,
        }
    }
}

/// Pipeline stage identifiers, in application order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StageName {
    /// Append `pseudoElement`.
    PseudoElement,
    /// Append or wrap each `state` entry.
    State,
    /// Append `aria` attribute selectors.
    Aria,
    /// Append `data` attribute selectors.
    Data,
    /// Wrap in each `container` query.
    Container,
    /// Wrap in the `motion` query.
    Motion,
    /// Wrap in each `responsive` query.
    Responsive,
}

/// One step of the composition fold.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    /// Which stage this is.
    pub name: StageName,
    /// Whether the stage has anything to do for these modifiers.
    pub applies: fn(&ParsedModifiers) -> bool,
    /// Transform the selector text produced so far.
    pub apply: fn(String, &ParsedModifiers) -> String,
}

/// The fixed composition order.
pub const PIPELINE: [Stage; 7] = [
    Stage {
        name: StageName::PseudoElement,
        applies: |m| m.pseudo_element.is_some(),
        apply: apply_pseudo_element,
    },
    Stage {
        name: StageName::State,
        applies: |m| !m.state.is_empty(),
        apply: apply_state,
    },
    Stage {
        name: StageName::Aria,
        applies: |m| !m.aria.is_empty(),
        apply: apply_aria,
    },
    Stage {
        name: StageName::Data,
        applies: |m| !m.data.is_empty(),
        apply: apply_data,
    },
    Stage {
        name: StageName::Container,
        applies: |m| !m.container.is_empty(),
        apply: apply_container,
    },
    Stage {
        name: StageName::Motion,
        applies: |m| m.motion.is_some(),
        apply: apply_motion,
    },
    Stage {
        name: StageName::Responsive,
        applies: |m| !m.responsive.is_empty(),
        apply: apply_responsive,
    },
];

/// Compose the final selector for `context`.
///
/// ```
/// use tailsel_core::generator::{ParsedModifiers, SelectorContext, generate_selector};
///
/// let mut modifiers = ParsedModifiers::default();
/// modifiers.pseudo_element = Some("::before".to_string());
/// modifiers.state.push(":hover".to_string());
/// let _ = modifiers
///     .responsive
///     .insert("md".to_string(), "@media (min-width: 768px)".to_string());
///
/// assert_eq!(
///     generate_selector(&SelectorContext::new(".btn", modifiers)),
///     "@media (min-width: 768px) { .btn::before:hover }"
/// );
/// ```
#[must_use]
pub fn generate_selector(context: &SelectorContext) -> String {
    compose(&context.base_selector, &context.modifiers)
}

/// [`generate_selector`] without building a [`SelectorContext`].
#[must_use]
pub fn compose(base_selector: &str, modifiers: &ParsedModifiers) -> String {
    PIPELINE
        .iter()
        .fold(base_selector.to_string(), |selector, stage| {
            if (stage.applies)(modifiers) {
                (stage.apply)(selector, modifiers)
            } else {
                selector
            }
        })
}

/// Run a single pipeline stage on `selector`, for callers that compose
/// partially or want to inspect one layer.
#[must_use]
pub fn apply_stage(name: StageName, selector: String, modifiers: &ParsedModifiers) -> String {
    match PIPELINE.iter().find(|stage| stage.name == name) {
        Some(stage) if (stage.applies)(modifiers) => (stage.apply)(selector, modifiers),
        _ => selector,
    }
}

/// Nest `selector` inside an at-rule block.
#[must_use]
pub fn wrap_in_at_rule(at_rule: &str, selector: &str) -> String {
    format!("{at_rule} {{ {selector} }}")
}

/// Whether a state entry is an at-rule prefix that wraps instead of appends.
#[must_use]
pub fn is_wrapping_state(entry: &str) -> bool {
    entry.starts_with("@media") || entry.starts_with("@supports")
}

fn apply_pseudo_element(selector: String, modifiers: &ParsedModifiers) -> String {
    match &modifiers.pseudo_element {
        Some(pseudo) => selector + pseudo,
        None => selector,
    }
}

fn apply_state(selector: String, modifiers: &ParsedModifiers) -> String {
    modifiers.state.iter().fold(selector, |selector, entry| {
        if is_wrapping_state(entry) {
            wrap_in_at_rule(entry, &selector)
        } else {
            selector + entry
        }
    })
}

// Attribute maps hold complete `[...]` fragments; append in key order.
fn append_attributes(selector: String, attributes: &IndexMap<String, String>) -> String {
    attributes
        .values()
        .fold(selector, |selector, attribute| selector + attribute)
}

fn apply_aria(selector: String, modifiers: &ParsedModifiers) -> String {
    append_attributes(selector, &modifiers.aria)
}

fn apply_data(selector: String, modifiers: &ParsedModifiers) -> String {
    append_attributes(selector, &modifiers.data)
}

fn wrap_each(selector: String, at_rules: &IndexMap<String, String>) -> String {
    at_rules
        .values()
        .fold(selector, |selector, at_rule| wrap_in_at_rule(at_rule, &selector))
}

fn apply_container(selector: String, modifiers: &ParsedModifiers) -> String {
    wrap_each(selector, &modifiers.container)
}

fn apply_motion(selector: String, modifiers: &ParsedModifiers) -> String {
    match &modifiers.motion {
        Some(query) => wrap_in_at_rule(query, &selector),
        None => selector,
    }
}

fn apply_responsive(selector: String, modifiers: &ParsedModifiers) -> String {
    wrap_each(selector, &modifiers.responsive)
}

/// Join the non-empty `selectors` with `combinator`.
///
/// Empty entries are dropped, not combined: `[".a", "", ".b"]` with `>`
/// gives `.a>.b`. Pass [`Combinator::as_str`] or [`Combinator::padded`] for
/// the standard combinators, or any other joiner.
#[must_use]
pub fn combine_selectors(selectors: &[&str], combinator: &str) -> String {
    selectors
        .iter()
        .filter(|selector| !selector.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(combinator)
}

/// Conservative sanity check for a selector string.
///
/// Rejects empty input, characters outside the usual selector alphabet
/// (notably `{`, `}` and `;`), unbalanced `()`/`[]`, and a leading or
/// trailing combinator. This is a heuristic, not a grammar: some legal
/// selectors are rejected and some nonsense passes.
#[must_use]
pub fn validate_selector(selector: &str) -> bool {
    let trimmed = selector.trim();
    if trimmed.is_empty() || !SELECTOR_CHARSET.is_match(trimmed) {
        return false;
    }
    let dangling = |c: char| matches!(c, '>' | '+' | '~' | ',');
    if trimmed.starts_with(dangling) || trimmed.ends_with(dangling) {
        return false;
    }
    is_balanced(trimmed, true)
}

/// Whether every `(` and `[` in `text` is closed in order.
///
/// Backslash-escaped characters are skipped. With `reject_blocks`, any
/// block or declaration delimiter (`{`, `}`, `;`) also fails the check.
pub(crate) fn is_balanced(text: &str, reject_blocks: bool) -> bool {
    let mut stack = Vec::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let _ = chars.next();
            }
            '(' | '[' => stack.push(c),
            ')' | ']' => {
                let open = if c == ')' { '(' } else { '[' };
                if stack.pop() != Some(open) {
                    return false;
                }
            }
            '{' | '}' | ';' if reject_blocks => return false,
            _ => {}
        }
    }
    stack.is_empty()
}

/// [CSSOM § 2.1 Serializing an identifier](https://drafts.csswg.org/cssom/#serialize-an-identifier)
///
/// Backslash-escape everything that is not an identifier code point so the
/// text can be embedded as a literal class name. A digit in first position,
/// or in second position after a leading `-`, is written as a hex escape,
/// since `\1` would not start an identifier. A lone `-` becomes `\-`.
#[must_use]
pub fn escape_selector(text: &str) -> String {
    if text == "-" {
        return "\\-".to_string();
    }

    let mut escaped = String::with_capacity(text.len() * 2);
    let leading_hyphen = text.starts_with('-');

    for (index, ch) in text.chars().enumerate() {
        let identifier_start = index == 0 || (index == 1 && leading_hyphen);
        match ch {
            '0'..='9' if identifier_start => {
                escaped.push_str("\\3");
                escaped.push(ch);
                escaped.push(' ');
            }
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => {
                escaped.push(c);
            }
            c => {
                escaped.push('\\');
                escaped.push(c);
            }
        }
    }

    escaped
}
