//! Valuation aggregation.
//!
//! One traversal of the whole allocation per agent perspective produces an
//! [`AgentAggregate`]: the agent's value for its own bundle and for the other
//! bundle, plus, per category, the worst chore it holds and the best good the
//! other agent holds.
//!
//! # Tie-breaking
//!
//! Extremum selection keeps the first item seen. A later item replaces the
//! current extremum only when strictly lower (chores) or strictly higher
//! (goods). Traversal order is the first bundle then the second bundle, items
//! in the order given, so the allocation's own ordering is the only source of
//! tie-breaking.
//!
//! Zero-valued items count toward the sums but are neither chores nor goods.

use crate::error::CertifyError;
use crate::oracle::{CategoryLookup, ValuationOracle};
use crate::types::{AgentId, Allocation, Category, ItemId};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// An extremal item within a category, with its value in the perspective
/// agent's eyes.
#[derive(Clone, Debug, PartialEq)]
pub struct Extremum {
    /// The selected item.
    pub item: ItemId,
    /// Its value to the perspective agent.
    pub value: f64,
}

/// Aggregated view of the allocation from one agent's perspective.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentAggregate {
    /// The perspective agent.
    pub agent: AgentId,
    /// Sum of the agent's values over its own bundle.
    pub own_value: f64,
    /// Sum of the agent's values over the other agent's bundle.
    pub other_value: f64,
    /// Per category, the most negative item the agent holds.
    pub worst_chore_own: BTreeMap<Category, Extremum>,
    /// Per category, the most positive (to this agent) item the other holds.
    pub best_good_other: BTreeMap<Category, Extremum>,
}

impl AgentAggregate {
    fn empty(agent: AgentId) -> Self {
        Self {
            agent,
            own_value: 0.0,
            other_value: 0.0,
            worst_chore_own: BTreeMap::new(),
            best_good_other: BTreeMap::new(),
        }
    }

    /// `own_value - other_value`; negative means the agent envies the other.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.own_value - self.other_value
    }

    fn record_chore(&mut self, category: Category, item: &ItemId, value: f64) {
        match self.worst_chore_own.entry(category) {
            Entry::Vacant(slot) => {
                slot.insert(Extremum {
                    item: item.clone(),
                    value,
                });
            }
            Entry::Occupied(mut slot) => {
                if value < slot.get().value {
                    slot.insert(Extremum {
                        item: item.clone(),
                        value,
                    });
                }
            }
        }
    }

    fn record_good(&mut self, category: Category, item: &ItemId, value: f64) {
        match self.best_good_other.entry(category) {
            Entry::Vacant(slot) => {
                slot.insert(Extremum {
                    item: item.clone(),
                    value,
                });
            }
            Entry::Occupied(mut slot) => {
                if value > slot.get().value {
                    slot.insert(Extremum {
                        item: item.clone(),
                        value,
                    });
                }
            }
        }
    }
}

/// Aggregates for both agents, in allocation order.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregates {
    /// Perspective of the first-checked agent.
    pub first: AgentAggregate,
    /// Perspective of the second-checked agent.
    pub second: AgentAggregate,
}

/// Runs the aggregation pass for both agents.
pub fn aggregate<V, L>(
    allocation: &Allocation,
    oracle: &V,
    categories: &L,
) -> Result<Aggregates, CertifyError>
where
    V: ValuationOracle + ?Sized,
    L: CategoryLookup + ?Sized,
{
    let [first, second] = allocation.agents();
    Ok(Aggregates {
        first: aggregate_for(first, allocation, oracle, categories)?,
        second: aggregate_for(second, allocation, oracle, categories)?,
    })
}

/// Runs the aggregation pass from `agent`'s perspective.
pub fn aggregate_for<V, L>(
    agent: &AgentId,
    allocation: &Allocation,
    oracle: &V,
    categories: &L,
) -> Result<AgentAggregate, CertifyError>
where
    V: ValuationOracle + ?Sized,
    L: CategoryLookup + ?Sized,
{
    let mut acc = AgentAggregate::empty(agent.clone());
    for bundle in allocation.bundles() {
        let owned = bundle.agent() == agent;
        for item in bundle.items() {
            let value = price(oracle, agent, item)?;
            let category = categories
                .category(item)
                .ok_or_else(|| CertifyError::CategoryLookup { item: item.clone() })?;
            if owned {
                acc.own_value += value;
                if value < 0.0 {
                    acc.record_chore(category, item, value);
                }
            } else {
                acc.other_value += value;
                if value > 0.0 {
                    acc.record_good(category, item, value);
                }
            }
        }
    }
    Ok(acc)
}

fn price<V>(oracle: &V, agent: &AgentId, item: &ItemId) -> Result<f64, CertifyError>
where
    V: ValuationOracle + ?Sized,
{
    oracle
        .value(agent, item)
        .filter(|v| v.is_finite())
        .ok_or_else(|| CertifyError::UnknownValuation {
            agent: agent.clone(),
            item: item.clone(),
        })
}
