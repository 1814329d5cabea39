//! `group-*` / `peer-*` variant recognition
//!
//! A `group` modifier styles an element based on the state of a marked
//! ancestor; a `peer` modifier styles it based on the state of the marked
//! sibling right before it.
//!
//! - `group` → `.group <base>`
//! - `group-hover` → `.group:hover <base>`
//! - `peer` → `.peer + <base>`
//! - `peer-focus` → `.peer:focus + <base>`

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::generator::{Combinator, combine_selectors};

/// Priority of every `group` modifier.
pub const GROUP_PRIORITY: u8 = 15;
/// Priority of every `peer` modifier. One above `group` so that peer
/// context is resolved as the more specific of the two.
pub const PEER_PRIORITY: u8 = 16;

/// Which marker element the modifier refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GroupPeerKind {
    /// Ancestor marked with `.group`.
    Group,
    /// Preceding sibling marked with `.peer`.
    Peer,
}

impl GroupPeerKind {
    /// [`GROUP_PRIORITY`] or [`PEER_PRIORITY`].
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Group => GROUP_PRIORITY,
            Self::Peer => PEER_PRIORITY,
        }
    }

    /// The marker class selector, `.group` or `.peer`.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Group => ".group",
            Self::Peer => ".peer",
        }
    }

    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// Descendant for `group`, next-sibling for `peer`.
    #[must_use]
    pub const fn combinator(self) -> Combinator {
        match self {
            Self::Group => Combinator::Descendant,
            Self::Peer => Combinator::NextSibling,
        }
    }
}

/// States that may follow `group-` or `peer-`.
///
/// The state name is emitted as-is after a colon.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CombinableState {
    /// `:hover`
    Hover,
    /// `:focus`
    Focus,
    /// `:active`
    Active,
    /// `:visited`
    Visited,
    /// `:target`
    Target,
    /// `:disabled`
    Disabled,
    /// `:enabled`
    Enabled,
    /// `:checked`
    Checked,
    /// `:indeterminate`
    Indeterminate,
    /// `:valid`
    Valid,
    /// `:invalid`
    Invalid,
    /// `:required`
    Required,
    /// `:optional`
    Optional,
    /// `:first`
    First,
    /// `:last`
    Last,
    /// `:odd`
    Odd,
    /// `:even`
    Even,
    /// `:open`
    Open,
    /// `:closed`
    Closed,
}

/// A recognized `group`/`peer` modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPeerModifier {
    /// Marker family.
    #[serde(rename = "type")]
    pub kind: GroupPeerKind,
    /// Optional state of the marker element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CombinableState>,
    /// The token this modifier was parsed from.
    pub raw: String,
    /// Derived from `kind`.
    pub priority: u8,
}

/// Whether `token` is `group`, `peer`, or one of them with a combinable state.
#[must_use]
pub fn is_group_peer_modifier(token: &str) -> bool {
    parse_group_peer_modifier(token).is_some()
}

/// Parse `group`, `peer`, `group-<state>` or `peer-<state>`.
#[must_use]
pub fn parse_group_peer_modifier(token: &str) -> Option<GroupPeerModifier> {
    let (prefix, state) = match token.split_once('-') {
        Some((prefix, state)) => (prefix, Some(CombinableState::from_str(state).ok()?)),
        None => (token, None),
    };
    let kind = match prefix {
        "group" => GroupPeerKind::Group,
        "peer" => GroupPeerKind::Peer,
        _ => return None,
    };

    Some(GroupPeerModifier {
        kind,
        state,
        raw: token.to_string(),
        priority: kind.priority(),
    })
}

/// Build the relational selector for `modifier` around `base_selector`.
#[must_use]
pub fn generate_group_peer_selector(modifier: &GroupPeerModifier, base_selector: &str) -> String {
    let marker = match modifier.state {
        Some(state) => format!("{}:{state}", modifier.kind.marker()),
        None => modifier.kind.marker().to_string(),
    };
    combine_selectors(
        &[marker.as_str(), base_selector],
        modifier.kind.combinator().padded(),
    )
}
