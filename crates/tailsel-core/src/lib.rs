//! Variant recognition and CSS selector composition for Tailwind-style classes.
//!
//! # Scope
//!
//! This crate implements:
//! - **Recognizers** - one per variant family, each a pure
//!   `is_*` / `parse_*` / `generate_*` triple
//!   - `nth-*` structural formulas ([`nth`])
//!   - `not-*` negations ([`not`])
//!   - `noscript`, `starting`, pointer and `supports-*` tokens ([`special`])
//!   - `group-*` / `peer-*` relational states ([`group_peer`])
//!
//! - **Composition** ([`generator`])
//!   - Fixed-order fold of pseudo-element, state, ARIA, data, container,
//!     motion and responsive stages
//!   - Selector combination, sanity checking and escaping
//!
//! - **Dispatch** ([`dispatch`])
//!   - Splitting a full class into variant tokens
//!   - Ordered recognizer dispatch
//!   - Resolution of a whole class against a [`config::ResolverConfig`]
//!
//! # Not Yet Implemented
//!
//! - Utility property values (`bg-blue-500` → color)
//! - Full CSS grammar validation of arbitrary `[...]` payloads
//!
//! Everything here is a pure function of its inputs and safe to share
//! across threads.

pub mod config;
pub mod dispatch;
pub mod generator;
pub mod group_peer;
pub mod modifier;
pub mod not;
pub mod nth;
pub mod special;

// Re-exports for convenience
pub use config::{ConfigError, DarkMode, ResolverConfig};
pub use dispatch::resolver::{Diagnostic, ModifierResolver, ResolveError, ResolvedClass};
pub use dispatch::{classify, split_class};
pub use generator::{
    Combinator, ParsedModifiers, SelectorContext, combine_selectors, escape_selector,
    generate_selector, validate_selector,
};
pub use group_peer::{CombinableState, GroupPeerKind, GroupPeerModifier};
pub use modifier::{Modifier, ModifierFamily};
pub use not::NotModifier;
pub use nth::{NthFormula, NthKind, NthModifier, matches_position};
pub use special::{SpecialKind, SpecialModifier};
