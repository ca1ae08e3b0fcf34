//! Identifier types for agents, items, and categories.
//!
//! Agents and items are opaque string identifiers. Categories carry an
//! explicit sentinel for "no category source supplied" so the category
//! intersection logic never has to special-case a missing lookup.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque identifier of an agent participating in an allocation.
///
/// ```
/// use ef11::AgentId;
///
/// let agent = AgentId::new("Agent1");
/// assert_eq!(agent.as_str(), "Agent1");
/// assert_eq!(agent.to_string(), "Agent1");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an agent identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AgentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque identifier of an indivisible item.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The category an item belongs to.
///
/// `Implicit` is the single shared category used when no category source is
/// supplied. It orders before every named category and serializes as `null`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    /// Every item shares this category when categories are absent.
    Implicit,
    /// A caller-supplied category label.
    Named(String),
}

impl Category {
    /// Creates a named category.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the category label, or `None` for the implicit category.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Implicit => None,
            Self::Named(name) => Some(name),
        }
    }

    /// Returns true for the implicit sentinel category.
    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implicit => f.write_str("<implicit>"),
            Self::Named(name) => f.write_str(name),
        }
    }
}
