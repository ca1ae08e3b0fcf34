//! Two-agent allocations.
//!
//! An [`Allocation`] is a pair of bundles, never an arbitrary-sized map, so
//! the two-agent constraint is carried by the type itself. Map-shaped inputs
//! (including serialized documents) go through [`Allocation::from_entries`],
//! which rejects anything other than exactly two distinct agents.
//!
//! Item order inside each bundle, and the order of the two bundles, is
//! preserved exactly as given: it is the only source of tie-breaking when the
//! aggregator selects extremal items.

use super::id::{AgentId, ItemId};
use crate::error::CertifyError;
use core::fmt;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The ordered items held by one agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    agent: AgentId,
    items: Vec<ItemId>,
}

impl Bundle {
    /// Creates a bundle for `agent` holding `items` in the given order.
    pub fn new<I>(agent: impl Into<AgentId>, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        Self {
            agent: agent.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// The agent holding this bundle.
    #[must_use]
    pub fn agent(&self) -> &AgentId {
        &self.agent
    }

    /// Items in the order they were supplied.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Number of items in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bundle holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `item` is part of this bundle.
    #[must_use]
    pub fn contains(&self, item: &ItemId) -> bool {
        self.items.contains(item)
    }
}

/// An allocation of items between exactly two distinct agents.
///
/// ```
/// use ef11::{Allocation, AgentId};
///
/// let allocation = Allocation::from_entries([
///     ("Agent1", vec!["o1", "o2"]),
///     ("Agent2", vec!["o3"]),
/// ])
/// .unwrap();
/// assert_eq!(allocation.first().agent(), &AgentId::new("Agent1"));
/// assert_eq!(allocation.second().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    first: Bundle,
    second: Bundle,
}

impl Allocation {
    /// Creates an allocation from two bundles held by distinct agents.
    pub fn new(first: Bundle, second: Bundle) -> Result<Self, CertifyError> {
        if first.agent == second.agent {
            return Err(CertifyError::InsufficientAgents { found: 1 });
        }
        Ok(Self { first, second })
    }

    /// Builds an allocation from `(agent, items)` entries.
    ///
    /// The first entry becomes the first-checked agent. Fails with
    /// [`CertifyError::InsufficientAgents`] unless there are exactly two
    /// entries naming two distinct agents.
    pub fn from_entries<E, A, T>(entries: E) -> Result<Self, CertifyError>
    where
        E: IntoIterator<Item = (A, T)>,
        A: Into<AgentId>,
        T: IntoIterator,
        T::Item: Into<ItemId>,
    {
        let mut bundles: Vec<Bundle> = entries
            .into_iter()
            .map(|(agent, items)| Bundle::new(agent, items))
            .collect();
        if bundles.len() != 2 {
            return Err(CertifyError::InsufficientAgents {
                found: bundles.len(),
            });
        }
        let second = bundles.pop();
        let first = bundles.pop();
        match (first, second) {
            (Some(first), Some(second)) => Self::new(first, second),
            _ => Err(CertifyError::InsufficientAgents { found: 0 }),
        }
    }

    /// The bundle of the agent whose envy is checked first.
    #[must_use]
    pub fn first(&self) -> &Bundle {
        &self.first
    }

    /// The bundle of the agent whose envy is checked second.
    #[must_use]
    pub fn second(&self) -> &Bundle {
        &self.second
    }

    /// Both bundles in traversal order.
    #[must_use]
    pub fn bundles(&self) -> [&Bundle; 2] {
        [&self.first, &self.second]
    }

    /// Both agents in traversal order.
    #[must_use]
    pub fn agents(&self) -> [&AgentId; 2] {
        [&self.first.agent, &self.second.agent]
    }

    /// The bundle held by `agent`, if it participates.
    #[must_use]
    pub fn bundle_of(&self, agent: &AgentId) -> Option<&Bundle> {
        self.bundles().into_iter().find(|b| &b.agent == agent)
    }

    /// The agent holding `item`, if any. The first bundle wins if the item
    /// was (incorrectly) given to both agents.
    #[must_use]
    pub fn holder_of(&self, item: &ItemId) -> Option<&AgentId> {
        self.bundles()
            .into_iter()
            .find(|b| b.contains(item))
            .map(Bundle::agent)
    }

    /// Total number of allocated items across both bundles.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.first.len() + self.second.len()
    }
}

impl Serialize for Allocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        for bundle in self.bundles() {
            map.serialize_entry(&bundle.agent, &bundle.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Allocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AllocationVisitor)
    }
}

struct AllocationVisitor;

impl<'de> Visitor<'de> for AllocationVisitor {
    type Value = Allocation;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from exactly two agents to their item lists")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut entries: Vec<(AgentId, Vec<ItemId>)> = Vec::with_capacity(2);
        while let Some(entry) = access.next_entry()? {
            entries.push(entry);
        }
        Allocation::from_entries(entries).map_err(serde::de::Error::custom)
    }
}
