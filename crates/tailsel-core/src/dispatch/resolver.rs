//! Full-class resolution
//!
//! [`ModifierResolver::resolve`] takes a complete utility class and sorts
//! each variant token into one of two buckets:
//!
//! - core variants (breakpoints, container sizes, motion, interaction
//!   pseudo-classes, pseudo-elements, `aria-*`, `data-*`) become fields of
//!   [`ParsedModifiers`] and go through the composition pipeline;
//! - everything the recognizers claim becomes a [`Modifier`]. Wrapping
//!   modifiers (`supports-*`, pointer media features) are turned into
//!   `state` at-rule entries so the pipeline nests them; the rest shape the
//!   selector text before the pipeline runs.
//!
//! Within `state`, appended pseudo-classes always precede at-rule entries,
//! so `dark:hover` and `hover:dark` both give
//! `@media (prefers-color-scheme: dark) { .x:hover }`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::{brackets_balanced, classify, split_class};
use crate::config::{DarkMode, ResolverConfig};
use crate::generator::{
    ParsedModifiers, combine_selectors, compose, escape_selector, is_wrapping_state,
    validate_selector,
};
use crate::modifier::Modifier;
use crate::not::validate_not_syntax;

/// Interaction, structural and input pseudo-class variants.
pub const PSEUDO_CLASS_VARIANTS: &[(&str, &str)] = &[
    // [§ 9 User Action Pseudo-classes](https://www.w3.org/TR/selectors-4/#useraction-pseudos)
    ("hover", ":hover"),
    ("focus", ":focus"),
    ("focus-within", ":focus-within"),
    ("focus-visible", ":focus-visible"),
    ("active", ":active"),
    // [§ 8 Location Pseudo-classes](https://www.w3.org/TR/selectors-4/#location)
    ("visited", ":visited"),
    ("target", ":target"),
    // [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
    ("first", ":first-child"),
    ("last", ":last-child"),
    ("only", ":only-child"),
    ("odd", ":nth-child(odd)"),
    ("even", ":nth-child(even)"),
    ("first-of-type", ":first-of-type"),
    ("last-of-type", ":last-of-type"),
    ("only-of-type", ":only-of-type"),
    ("empty", ":empty"),
    // [§ 13 The Input Pseudo-classes](https://www.w3.org/TR/selectors-4/#input-pseudos)
    ("disabled", ":disabled"),
    ("enabled", ":enabled"),
    ("checked", ":checked"),
    ("indeterminate", ":indeterminate"),
    ("default", ":default"),
    ("required", ":required"),
    ("optional", ":optional"),
    ("valid", ":valid"),
    ("invalid", ":invalid"),
    ("in-range", ":in-range"),
    ("out-of-range", ":out-of-range"),
    ("placeholder-shown", ":placeholder-shown"),
    ("autofill", ":autofill"),
    ("read-only", ":read-only"),
    ("open", ":is([open], :popover-open)"),
];

/// State variants that wrap in an at-rule instead of appending.
pub const AT_RULE_STATE_VARIANTS: &[(&str, &str)] = &[
    ("print", "@media print"),
    ("portrait", "@media (orientation: portrait)"),
    ("landscape", "@media (orientation: landscape)"),
    ("contrast-more", "@media (prefers-contrast: more)"),
    ("contrast-less", "@media (prefers-contrast: less)"),
    ("forced-colors", "@media (forced-colors: active)"),
];

/// [§ 11 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
pub const PSEUDO_ELEMENT_VARIANTS: &[(&str, &str)] = &[
    ("before", "::before"),
    ("after", "::after"),
    ("placeholder", "::placeholder"),
    ("file", "::file-selector-button"),
    ("marker", "::marker"),
    ("selection", "::selection"),
    ("first-line", "::first-line"),
    ("first-letter", "::first-letter"),
    ("backdrop", "::backdrop"),
];

/// [Media Queries Level 5 § 12.1 prefers-reduced-motion](https://www.w3.org/TR/mediaqueries-5/#prefers-reduced-motion)
pub const MOTION_VARIANTS: &[(&str, &str)] = &[
    ("motion-safe", "@media (prefers-reduced-motion: no-preference)"),
    ("motion-reduce", "@media (prefers-reduced-motion: reduce)"),
];

/// [Media Queries Level 5 § 12.5 prefers-color-scheme](https://www.w3.org/TR/mediaqueries-5/#prefers-color-scheme)
pub const DARK_MEDIA_QUERY: &str = "@media (prefers-color-scheme: dark)";

/// Ancestor class used by [`DarkMode::Class`].
pub const DARK_CLASS_ANCESTOR: &str = ".dark";

/// Why a class could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The class, or its utility part, is empty.
    #[error("empty class")]
    EmptyClass,

    /// A `[` or `(` is never closed, or closes out of order.
    #[error("unbalanced brackets in '{class}'")]
    UnbalancedBrackets {
        /// The offending class.
        class: String,
    },

    /// No core table or recognizer claims the token.
    #[error("unknown variant '{token}'")]
    UnknownVariant {
        /// The unrecognized token (empty for `a::b`).
        token: String,
    },

    /// Two variants fill a single-valued field.
    #[error("conflicting {field} variants '{first}' and '{second}'")]
    Conflict {
        /// `pseudo-element` or `motion`.
        field: &'static str,
        /// The token that filled the field first.
        first: String,
        /// The token that tried to fill it again.
        second: String,
    },
}

/// Advisory finding about an accepted class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// An arbitrary `[...]` payload was passed through without passing the
    /// selector sanity check.
    UnvalidatedArbitrary {
        /// The variant token carrying the payload.
        token: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnvalidatedArbitrary { token } => {
                write!(f, "arbitrary variant '{token}' failed the selector sanity check")
            }
        }
    }
}

/// A class split into everything needed to build its selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedClass {
    /// The full class, variants included.
    pub class_name: String,
    /// The utility part after the last variant.
    pub utility: String,
    /// Core variants and wrapping recognizer modifiers.
    pub modifiers: ParsedModifiers,
    /// Recognizer modifiers that shape the selector text, in source order.
    pub selector_modifiers: Vec<Modifier>,
    /// Ancestor selectors placed before everything else (dark class mode).
    pub ancestors: Vec<String>,
    /// Advisory findings; never block output.
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedClass {
    /// `.<escaped class name>`
    #[must_use]
    pub fn base_selector(&self) -> String {
        format!(".{}", escape_selector(&self.class_name))
    }

    /// The final selector / at-rule shell for this class.
    ///
    /// Selector-shaping modifiers are applied in ascending priority (ties in
    /// source order), then ancestors, then the composition pipeline.
    #[must_use]
    pub fn selector(&self) -> String {
        let mut ordered: Vec<&Modifier> = self.selector_modifiers.iter().collect();
        ordered.sort_by_key(|modifier| modifier.priority());

        let shaped = ordered
            .iter()
            .fold(self.base_selector(), |selector, modifier| {
                modifier.apply(&selector)
            });
        let shaped = self.ancestors.iter().fold(shaped, |selector, ancestor| {
            combine_selectors(&[ancestor.as_str(), selector.as_str()], " ")
        });

        compose(&shaped, &self.modifiers)
    }
}

/// Resolves full utility classes against a [`ResolverConfig`].
#[derive(Debug, Clone, Default)]
pub struct ModifierResolver {
    config: ResolverConfig,
}

/// Fields that may only be set once per class, with the token that set them.
#[derive(Default)]
struct SingleValued<'a> {
    pseudo_element: Option<&'a str>,
    motion: Option<&'a str>,
}

impl ModifierResolver {
    /// Resolver over `config`.
    #[must_use]
    pub const fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `class` into modifiers.
    ///
    /// # Errors
    ///
    /// See [`ResolveError`]. Advisory problems are reported through
    /// [`ResolvedClass::diagnostics`] instead.
    pub fn resolve(&self, class: &str) -> Result<ResolvedClass, ResolveError> {
        let class = class.trim();
        if class.is_empty() {
            return Err(ResolveError::EmptyClass);
        }
        if !brackets_balanced(class) {
            return Err(ResolveError::UnbalancedBrackets {
                class: class.to_string(),
            });
        }

        let (variants, utility) = split_class(class);
        if utility.is_empty() {
            return Err(ResolveError::EmptyClass);
        }

        let mut resolved = ResolvedClass {
            class_name: class.to_string(),
            utility: utility.to_string(),
            modifiers: ParsedModifiers::default(),
            selector_modifiers: Vec::new(),
            ancestors: Vec::new(),
            diagnostics: Vec::new(),
        };
        let mut single = SingleValued::default();

        for token in variants {
            self.resolve_variant(token, &mut resolved, &mut single)?;
        }

        // Appended pseudo-classes must land inside every at-rule wrap, so
        // they go first; each group keeps its source order.
        let (mut state, wrapping): (Vec<String>, Vec<String>) = resolved
            .modifiers
            .state
            .drain(..)
            .partition(|entry| !is_wrapping_state(entry));
        state.extend(wrapping);
        resolved.modifiers.state = state;

        Ok(resolved)
    }

    /// Resolve `class` and build its selector in one step.
    ///
    /// # Errors
    ///
    /// See [`ModifierResolver::resolve`].
    pub fn selector_for(&self, class: &str) -> Result<String, ResolveError> {
        self.resolve(class).map(|resolved| resolved.selector())
    }

    fn resolve_variant<'a>(
        &self,
        token: &'a str,
        resolved: &mut ResolvedClass,
        single: &mut SingleValued<'a>,
    ) -> Result<(), ResolveError> {
        let modifiers = &mut resolved.modifiers;

        if let Some(query) = self.responsive_query(token) {
            let _ = modifiers.responsive.insert(token.to_string(), query);
            return Ok(());
        }

        if let Some(query) = self.container_query(token) {
            let _ = modifiers.container.insert(token.to_string(), query);
            return Ok(());
        }

        if let Some(query) = lookup(MOTION_VARIANTS, token) {
            set_once("motion", &mut single.motion, token)?;
            modifiers.motion = Some(query.to_string());
            return Ok(());
        }

        if token == "dark" {
            match self.config.dark_mode {
                DarkMode::Media => modifiers.state.push(DARK_MEDIA_QUERY.to_string()),
                DarkMode::Class => resolved.ancestors.push(DARK_CLASS_ANCESTOR.to_string()),
            }
            return Ok(());
        }

        if let Some(state) =
            lookup(PSEUDO_CLASS_VARIANTS, token).or_else(|| lookup(AT_RULE_STATE_VARIANTS, token))
        {
            modifiers.state.push(state.to_string());
            return Ok(());
        }

        if let Some(pseudo) = lookup(PSEUDO_ELEMENT_VARIANTS, token) {
            set_once("pseudo-element", &mut single.pseudo_element, token)?;
            modifiers.pseudo_element = Some(pseudo.to_string());
            return Ok(());
        }

        if let Some(name) = token.strip_prefix("aria-") {
            let selector = aria_selector(name).ok_or_else(|| unknown(token))?;
            let _ = modifiers.aria.insert(token.to_string(), selector);
            return Ok(());
        }

        if let Some(name) = token.strip_prefix("data-") {
            let selector = data_selector(name).ok_or_else(|| unknown(token))?;
            let _ = modifiers.data.insert(token.to_string(), selector);
            return Ok(());
        }

        let modifier = classify(token).ok_or_else(|| unknown(token))?;
        if matches!(modifier, Modifier::Not(_)) && !not_payload_is_valid(token) {
            resolved.diagnostics.push(Diagnostic::UnvalidatedArbitrary {
                token: token.to_string(),
            });
        }
        match modifier.at_rule() {
            Some(at_rule) => resolved.modifiers.state.push(at_rule),
            None => resolved.selector_modifiers.push(modifier),
        }
        Ok(())
    }

    /// `sm`, `max-md`, `min-[800px]`, `max-[600px]`
    fn responsive_query(&self, token: &str) -> Option<String> {
        if let Some(size) = self.config.breakpoints.get(token) {
            return Some(format!("@media (min-width: {size})"));
        }
        if let Some(value) = arbitrary(token, "min-") {
            return Some(format!("@media (min-width: {value})"));
        }
        if let Some(value) = arbitrary(token, "max-") {
            return Some(format!("@media (max-width: {value})"));
        }
        let size = self.config.breakpoints.get(token.strip_prefix("max-")?)?;
        Some(format!("@media not all and (min-width: {size})"))
    }

    /// `@md`, `@md/sidebar`, `@min-[400px]`, `@max-[30rem]`
    fn container_query(&self, token: &str) -> Option<String> {
        let rest = token.strip_prefix('@')?;
        let (size_name, container_name) = match rest.split_once('/') {
            Some((size_name, name)) if !name.is_empty() => (size_name, Some(name)),
            Some(_) => return None,
            None => (rest, None),
        };

        let condition = if let Some(value) = arbitrary(size_name, "min-") {
            format!("(min-width: {value})")
        } else if let Some(value) = arbitrary(size_name, "max-") {
            format!("(max-width: {value})")
        } else {
            format!("(min-width: {})", self.config.containers.get(size_name)?)
        };

        Some(match container_name {
            Some(name) => format!("@container {name} {condition}"),
            None => format!("@container {condition}"),
        })
    }
}

fn lookup(table: &[(&str, &'static str)], token: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|&(_, value)| value)
}

/// `<prefix>[<value>]` → `<value>`, rejecting an empty payload.
fn arbitrary<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    token
        .strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix(']')
        .filter(|value| !value.is_empty())
}

/// `aria-checked` → `[aria-checked="true"]`, `aria-[sort=ascending]` → `[aria-sort=ascending]`
fn aria_selector(name: &str) -> Option<String> {
    if let Some(inner) = arbitrary(name, "") {
        return Some(format!("[aria-{inner}]"));
    }
    is_attribute_name(name).then(|| format!("[aria-{name}=\"true\"]"))
}

/// `data-active` → `[data-active]`, `data-[state=open]` → `[data-state=open]`
fn data_selector(name: &str) -> Option<String> {
    if let Some(inner) = arbitrary(name, "") {
        return Some(format!("[data-{inner}]"));
    }
    is_attribute_name(name).then(|| format!("[data-{name}]"))
}

/// Named negations always pass; arbitrary ones must pass both the negation
/// shape check and the selector sanity check on their payload.
fn not_payload_is_valid(token: &str) -> bool {
    if !validate_not_syntax(token) {
        return false;
    }
    arbitrary(token, "not-").is_none_or(validate_selector)
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn set_once<'a>(
    field: &'static str,
    slot: &mut Option<&'a str>,
    token: &'a str,
) -> Result<(), ResolveError> {
    if let Some(first) = slot {
        return Err(ResolveError::Conflict {
            field,
            first: (*first).to_string(),
            second: token.to_string(),
        });
    }
    *slot = Some(token);
    Ok(())
}

fn unknown(token: &str) -> ResolveError {
    ResolveError::UnknownVariant {
        token: token.to_string(),
    }
}
