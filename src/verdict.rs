//! Verdict records produced by the certifier.
//!
//! A [`Verdict`] is the complete output contract: the overall EF[1,1]
//! answer, the violating ordered pair if any, every swap candidate that was
//! evaluated, per-agent bundle values, and the state each envy direction
//! finished in.

use crate::types::{AgentId, Category, ItemId};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single same-category swap considered for cancelling envy.
///
/// The envious agent gives up `remove_from_own` (a chore to it) and the
/// envied agent gives up `remove_from_other` (a good to the envious agent).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwapCandidate {
    /// Category shared by both items.
    pub category: Category,
    /// Item removed from the envious agent's bundle.
    pub remove_from_own: ItemId,
    /// Item removed from the envied agent's bundle.
    pub remove_from_other: ItemId,
    /// Value of `remove_from_own` to the envious agent (negative).
    pub chore_value: f64,
    /// Value of `remove_from_other` to the envious agent (positive).
    pub good_value: f64,
    /// `good_value - chore_value`.
    pub gain: f64,
    /// Whether `gain` covers the envy gap.
    pub eliminates_envy: bool,
}

/// Bundle values from one agent's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BundleValues {
    /// The agent's value for its own bundle.
    pub own_value: f64,
    /// The agent's value for the other agent's bundle.
    pub other_value: f64,
    /// `own_value - other_value`.
    pub gap: f64,
}

/// Where a single envy direction ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionStatus {
    /// Not evaluated because an earlier direction already failed.
    NotChecked,
    /// The envious-candidate agent does not envy.
    NoEnvy,
    /// Envy exists but some swap eliminates it.
    Eliminable,
    /// Envy exists and no single same-category swap eliminates it.
    Failed,
}

impl DirectionStatus {
    /// Returns true when the direction was evaluated.
    #[must_use]
    pub const fn is_checked(self) -> bool {
        !matches!(self, Self::NotChecked)
    }

    /// Returns true when the direction was evaluated and passed.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::NoEnvy | Self::Eliminable)
    }

    /// Returns the status name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotChecked => "not checked",
            Self::NoEnvy => "no envy",
            Self::Eliminable => "eliminable",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for DirectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking whether `envious` envies `envied` beyond repair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionCheck {
    /// The agent whose envy is examined.
    pub envious: AgentId,
    /// The agent being envied.
    pub envied: AgentId,
    /// Final state of the check.
    pub status: DirectionStatus,
    /// Amount of envy to cancel, present only when envy exists.
    pub needed: Option<f64>,
}

impl DirectionCheck {
    pub(crate) fn pending(envious: &AgentId, envied: &AgentId) -> Self {
        Self {
            envious: envious.clone(),
            envied: envied.clone(),
            status: DirectionStatus::NotChecked,
            needed: None,
        }
    }
}

/// The certifier's answer for one allocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the allocation is EF[1,1].
    pub is_ef11: bool,
    /// `(envious, envied)` for the first direction that failed.
    pub violating_pair: Option<(AgentId, AgentId)>,
    /// Swap candidates evaluated for each agent's envy.
    pub swap_pairs: BTreeMap<AgentId, Vec<SwapCandidate>>,
    /// Bundle values from each agent's perspective.
    pub bundle_values: BTreeMap<AgentId, BundleValues>,
    /// Per-direction results in evaluation order.
    pub directions: [DirectionCheck; 2],
}

impl Verdict {
    /// Swap candidates recorded for `agent`'s envy (empty if none).
    #[must_use]
    pub fn swap_pairs_for(&self, agent: &AgentId) -> &[SwapCandidate] {
        self.swap_pairs
            .get(agent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Bundle values from `agent`'s perspective.
    #[must_use]
    pub fn bundle_values_for(&self, agent: &AgentId) -> Option<&BundleValues> {
        self.bundle_values.get(agent)
    }

    /// Candidates for `agent` that eliminate its envy.
    pub fn eliminating_swaps(&self, agent: &AgentId) -> impl Iterator<Item = &SwapCandidate> {
        self.swap_pairs_for(agent)
            .iter()
            .filter(|candidate| candidate.eliminates_envy)
    }

    /// The direction check where `agent` is the envious side.
    #[must_use]
    pub fn direction_for(&self, agent: &AgentId) -> Option<&DirectionCheck> {
        self.directions.iter().find(|d| &d.envious == agent)
    }

    /// Serializes the verdict as pretty JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
