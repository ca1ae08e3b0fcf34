//! Valuation and category seams consumed by the certifier.
//!
//! The certifier never owns valuations or categories. It reads them through
//! two traits:
//!
//! - [`ValuationOracle`] prices an item from one agent's perspective.
//! - [`CategoryLookup`] places an item in a [`Category`].
//!
//! Table-backed implementations ([`Valuations`], [`ItemCategories`]) cover
//! the usual case of a fully specified instance; [`Uncategorized`] is the
//! lookup used when no categories are supplied. Closures implement
//! [`ValuationOracle`] directly.

use crate::types::{AgentId, Category, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prices items from an agent's perspective.
///
/// Returning `None` means the pair cannot be priced; the certifier treats
/// that as an error rather than an implicit zero. Non-finite values are
/// treated the same way.
pub trait ValuationOracle {
    /// Value of `item` in the eyes of `agent`.
    fn value(&self, agent: &AgentId, item: &ItemId) -> Option<f64>;
}

impl<F> ValuationOracle for F
where
    F: Fn(&AgentId, &ItemId) -> Option<f64>,
{
    fn value(&self, agent: &AgentId, item: &ItemId) -> Option<f64> {
        self(agent, item)
    }
}

/// Places items into categories.
pub trait CategoryLookup {
    /// Category of `item`, or `None` if the source has no entry for it.
    fn category(&self, item: &ItemId) -> Option<Category>;
}

/// Category lookup for instances without categories: every item shares the
/// implicit category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Uncategorized;

impl CategoryLookup for Uncategorized {
    fn category(&self, _item: &ItemId) -> Option<Category> {
        Some(Category::Implicit)
    }
}

/// Table of per-agent item valuations.
///
/// ```
/// use ef11::{AgentId, ItemId, ValuationOracle, Valuations};
///
/// let table = Valuations::new()
///     .with("Agent1", [("o1", -1.0), ("o2", 2.0)])
///     .with("Agent2", [("o1", 0.0), ("o2", -3.0)]);
/// assert_eq!(table.value(&AgentId::new("Agent1"), &ItemId::new("o2")), Some(2.0));
/// assert_eq!(table.value(&AgentId::new("Agent2"), &ItemId::new("o9")), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Valuations {
    table: BTreeMap<AgentId, BTreeMap<ItemId, f64>>,
}

impl Valuations {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or extends) the valuations of `agent`.
    #[must_use]
    pub fn with<I, K>(mut self, agent: impl Into<AgentId>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<ItemId>,
    {
        self.table
            .entry(agent.into())
            .or_default()
            .extend(values.into_iter().map(|(item, v)| (item.into(), v)));
        self
    }

    /// Sets a single valuation.
    pub fn insert(&mut self, agent: impl Into<AgentId>, item: impl Into<ItemId>, value: f64) {
        self.table
            .entry(agent.into())
            .or_default()
            .insert(item.into(), value);
    }

    /// Agents with at least one valuation, in sorted order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentId> {
        self.table.keys()
    }

    /// Every item valued by any agent, deduplicated and sorted.
    #[must_use]
    pub fn items(&self) -> Vec<&ItemId> {
        let mut items: Vec<&ItemId> = self.table.values().flat_map(BTreeMap::keys).collect();
        items.sort();
        items.dedup();
        items
    }

    /// Whether the table has no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl ValuationOracle for Valuations {
    fn value(&self, agent: &AgentId, item: &ItemId) -> Option<f64> {
        self.table.get(agent)?.get(item).copied()
    }
}

/// Total item → category map.
///
/// Any item missing from the map is a lookup failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCategories {
    map: BTreeMap<ItemId, String>,
}

impl ItemCategories {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(item, category)` pairs.
    pub fn from_pairs<I, K, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<ItemId>,
        C: Into<String>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(item, cat)| (item.into(), cat.into()))
                .collect(),
        }
    }

    /// Assigns `item` to `category`.
    pub fn insert(&mut self, item: impl Into<ItemId>, category: impl Into<String>) {
        self.map.insert(item.into(), category.into());
    }

    /// Iterates `(item, category name)` in item order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &str)> {
        self.map.iter().map(|(item, cat)| (item, cat.as_str()))
    }

    /// Number of mapped items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no item is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl CategoryLookup for ItemCategories {
    fn category(&self, item: &ItemId) -> Option<Category> {
        self.map.get(item).map(|name| Category::Named(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test(test_name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(test_name);
    }

    #[test]
    fn closures_are_oracles() {
        init_test("closures_are_oracles");
        let oracle = |agent: &AgentId, item: &ItemId| -> Option<f64> {
            (agent.as_str() == "A").then(|| item.as_str().len() as f64)
        };
        let a = AgentId::new("A");
        let b = AgentId::new("B");
        let item = ItemId::new("abc");
        crate::assert_with_log!(
            oracle.value(&a, &item) == Some(3.0),
            "closure prices for A",
            Some(3.0),
            oracle.value(&a, &item)
        );
        assert_eq!(oracle.value(&b, &item), None);
        crate::test_complete!("closures_are_oracles");
    }

    #[test]
    fn uncategorized_is_total() {
        init_test("uncategorized_is_total");
        assert_eq!(
            Uncategorized.category(&ItemId::new("anything")),
            Some(Category::Implicit)
        );
        crate::test_complete!("uncategorized_is_total");
    }

    #[test]
    fn item_categories_lookup() {
        init_test("item_categories_lookup");
        let cats = ItemCategories::from_pairs([("o1", "cat1"), ("o5", "cat2")]);
        assert_eq!(cats.len(), 2);
        assert_eq!(
            cats.category(&ItemId::new("o5")),
            Some(Category::named("cat2"))
        );
        assert_eq!(cats.category(&ItemId::new("o2")), None);
        let names: Vec<&str> = cats.iter().map(|(_, c)| c).collect();
        assert_eq!(names, ["cat1", "cat2"]);
        crate::test_complete!("item_categories_lookup");
    }

    #[test]
    fn valuations_table() {
        init_test("valuations_table");
        let mut table = Valuations::new().with("A", [("x", 1.0), ("y", -2.0)]);
        table.insert("B", "z", 0.5);
        let items: Vec<&str> = table.items().into_iter().map(ItemId::as_str).collect();
        assert_eq!(items, ["x", "y", "z"]);
        assert_eq!(table.agents().count(), 2);
        assert_eq!(
            table.value(&AgentId::new("A"), &ItemId::new("y")),
            Some(-2.0)
        );
        assert_eq!(table.value(&AgentId::new("C"), &ItemId::new("y")), None);

        let json = serde_json::to_string(&table).unwrap();
        let back: Valuations = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        crate::test_complete!("valuations_table");
    }
}
