//! Problem instances and case documents.
//!
//! An [`Instance`] is the data a division problem is posed with: valuations,
//! optional item categories, and optional per-category capacities. A
//! [`Case`] adds the allocation to be certified, so a single JSON or YAML
//! document describes one certification run:
//!
//! ```yaml
//! valuations:
//!   Agent1: { o1: 0, o2: -1, o3: -4 }
//!   Agent2: { o1: 0, o2: -1, o3: -2 }
//! item_categories: { o1: cat1, o2: cat1, o3: cat1 }
//! category_capacities: { cat1: 2 }
//! allocation:
//!   Agent1: [o3]
//!   Agent2: [o1, o2]
//! ```
//!
//! Capacities are carried for reporting only; they are never enforced here.

use crate::certifier::Certifier;
use crate::error::CertifyError;
use crate::oracle::{CategoryLookup, ItemCategories, Uncategorized, ValuationOracle, Valuations};
use crate::types::{AgentId, Allocation, Category, ItemId};
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Valuations plus optional category structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Agent → item → value.
    pub valuations: Valuations,
    /// Item → category name; absent means one implicit category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_categories: Option<ItemCategories>,
    /// Category name → capacity. Informational.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_capacities: BTreeMap<String, u32>,
}

/// One row of the item table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    /// The item.
    pub item: ItemId,
    /// Its category (implicit when the instance has none).
    pub category: Category,
    /// Value to each allocated agent, `None` where the agent has no valuation.
    pub values: BTreeMap<AgentId, Option<f64>>,
    /// The agent holding the item, if allocated.
    pub allocated_to: Option<AgentId>,
}

/// Per-category holdings, with the declared capacity if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category.
    pub category: Category,
    /// Declared capacity, if the instance names one.
    pub capacity: Option<u32>,
    /// Number of allocated items of this category held by each agent.
    pub held: BTreeMap<AgentId, usize>,
}

impl Instance {
    /// Creates an uncategorized instance.
    #[must_use]
    pub fn new(valuations: Valuations) -> Self {
        Self {
            valuations,
            item_categories: None,
            category_capacities: BTreeMap::new(),
        }
    }

    /// Attaches an item → category map.
    #[must_use]
    pub fn with_categories(mut self, categories: ItemCategories) -> Self {
        self.item_categories = Some(categories);
        self
    }

    /// Attaches category capacities.
    #[must_use]
    pub fn with_capacities<I, C>(mut self, capacities: I) -> Self
    where
        I: IntoIterator<Item = (C, u32)>,
        C: Into<String>,
    {
        self.category_capacities
            .extend(capacities.into_iter().map(|(c, n)| (c.into(), n)));
        self
    }

    /// The category lookup this instance implies.
    #[must_use]
    pub fn category_lookup(&self) -> &dyn CategoryLookup {
        match &self.item_categories {
            Some(categories) => categories,
            None => &Uncategorized,
        }
    }

    /// Certifies `allocation` against this instance.
    pub fn certify(
        &self,
        allocation: &Allocation,
        certifier: &Certifier,
    ) -> Result<Verdict, CertifyError> {
        certifier.certify(allocation, &self.valuations, self.category_lookup())
    }

    /// Checks that `allocation` can be certified without producing a verdict.
    ///
    /// Every allocated item must be priced by both agents and, when
    /// categories are present, mapped to a category.
    pub fn validate(&self, allocation: &Allocation) -> Result<(), CertifyError> {
        let lookup = self.category_lookup();
        for agent in allocation.agents() {
            for bundle in allocation.bundles() {
                for item in bundle.items() {
                    self.valuations
                        .value(agent, item)
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| CertifyError::UnknownValuation {
                            agent: agent.clone(),
                            item: item.clone(),
                        })?;
                    lookup
                        .category(item)
                        .ok_or_else(|| CertifyError::CategoryLookup { item: item.clone() })?;
                }
            }
        }
        Ok(())
    }

    /// Items the instance knows about: the category map's keys when present,
    /// otherwise every item any agent values.
    #[must_use]
    pub fn items(&self) -> Vec<ItemId> {
        match &self.item_categories {
            Some(categories) => categories.iter().map(|(item, _)| item.clone()).collect(),
            None => self.valuations.items().into_iter().cloned().collect(),
        }
    }

    /// One row per known item, sorted by (category, item).
    #[must_use]
    pub fn item_details(&self, allocation: &Allocation) -> Vec<ItemDetail> {
        let lookup = self.category_lookup();
        let mut rows: Vec<ItemDetail> = self
            .items()
            .into_iter()
            .map(|item| ItemDetail {
                category: lookup.category(&item).unwrap_or(Category::Implicit),
                values: allocation
                    .agents()
                    .into_iter()
                    .map(|agent| (agent.clone(), self.valuations.value(agent, &item)))
                    .collect(),
                allocated_to: allocation.holder_of(&item).cloned(),
                item,
            })
            .collect();
        rows.sort_by(|a, b| (&a.category, &a.item).cmp(&(&b.category, &b.item)));
        rows
    }

    /// Holdings per category for every category that has items or a capacity.
    #[must_use]
    pub fn category_summaries(&self, allocation: &Allocation) -> Vec<CategorySummary> {
        let lookup = self.category_lookup();
        let agents = allocation.agents();
        let mut summaries: BTreeMap<Category, CategorySummary> = BTreeMap::new();

        for (name, &capacity) in &self.category_capacities {
            let category = Category::named(name.as_str());
            summaries
                .entry(category.clone())
                .or_insert_with(|| empty_summary(category, &agents))
                .capacity = Some(capacity);
        }
        for bundle in allocation.bundles() {
            for item in bundle.items() {
                let Some(category) = lookup.category(item) else {
                    continue;
                };
                let summary = summaries
                    .entry(category.clone())
                    .or_insert_with(|| empty_summary(category, &agents));
                *summary.held.entry(bundle.agent().clone()).or_insert(0) += 1;
            }
        }
        summaries.into_values().collect()
    }
}

fn empty_summary(category: Category, agents: &[&AgentId; 2]) -> CategorySummary {
    CategorySummary {
        category,
        capacity: None,
        held: agents.iter().map(|&agent| (agent.clone(), 0)).collect(),
    }
}

/// An instance together with the allocation to certify.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// The problem instance.
    #[serde(flatten)]
    pub instance: Instance,
    /// The allocation under test.
    pub allocation: Allocation,
}

impl Case {
    /// Certifies the case's allocation.
    pub fn certify(&self, certifier: &Certifier) -> Result<Verdict, CertifyError> {
        self.instance.certify(&self.allocation, certifier)
    }

    /// Validates the case without certifying it.
    pub fn validate(&self) -> Result<(), CertifyError> {
        self.instance.validate(&self.allocation)
    }

    /// Item table for the case's allocation.
    #[must_use]
    pub fn item_details(&self) -> Vec<ItemDetail> {
        self.instance.item_details(&self.allocation)
    }

    /// Category holdings for the case's allocation.
    #[must_use]
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        self.instance.category_summaries(&self.allocation)
    }
}
