//! Swap discovery and envy resolution.
//!
//! For each envy direction `(X, Y)`, in allocation order:
//!
//! 1. If `gap(X) >= 0`, X does not envy Y.
//! 2. Otherwise `needed = -gap(X)`, and the candidate categories are those
//!    where X holds a chore and Y holds a good (in X's eyes).
//! 3. Each candidate category yields one [`SwapCandidate`] with
//!    `gain = good_value - chore_value`; it eliminates envy when
//!    `gain >= needed`. Every candidate is recorded.
//! 4. If no candidate eliminates envy the direction fails.
//!
//! In [`DirectionMode::ShortCircuit`] a failing first direction ends the
//! check and the reverse direction stays [`DirectionStatus::NotChecked`].

use crate::aggregate::{AgentAggregate, Aggregates};
use crate::config::{CertifierConfig, DirectionMode};
use crate::tracing_compat::{debug, trace};
use crate::types::AgentId;
use crate::verdict::{BundleValues, DirectionCheck, DirectionStatus, SwapCandidate, Verdict};
use std::collections::BTreeMap;

/// Result of evaluating one envy direction.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionOutcome {
    /// Final state of the direction.
    pub check: DirectionCheck,
    /// Candidates evaluated, in ascending category order.
    pub candidates: Vec<SwapCandidate>,
}

/// Evaluates whether `envious` (already aggregated) envies `envied` beyond
/// what a single same-category swap can repair.
pub fn check_direction(
    envious: &AgentAggregate,
    envied: &AgentId,
    config: &CertifierConfig,
) -> DirectionOutcome {
    let mut check = DirectionCheck::pending(&envious.agent, envied);
    let gap = envious.gap();
    if config.is_envy_free(gap) {
        check.status = DirectionStatus::NoEnvy;
        debug!(envious = %envious.agent, envied = %envied, gap, "no envy");
        return DirectionOutcome {
            check,
            candidates: Vec::new(),
        };
    }

    let needed = -gap;
    check.needed = Some(needed);
    let candidates: Vec<SwapCandidate> = envious
        .worst_chore_own
        .iter()
        .filter_map(|(category, chore)| {
            let good = envious.best_good_other.get(category)?;
            let gain = good.value - chore.value;
            let eliminates_envy = config.clears(gain, needed);
            trace!(
                envious = %envious.agent,
                category = %category,
                chore = %chore.item,
                good = %good.item,
                gain,
                needed,
                eliminates = eliminates_envy,
                "swap candidate"
            );
            Some(SwapCandidate {
                category: category.clone(),
                remove_from_own: chore.item.clone(),
                remove_from_other: good.item.clone(),
                chore_value: chore.value,
                good_value: good.value,
                gain,
                eliminates_envy,
            })
        })
        .collect();

    check.status = if candidates.iter().any(|c| c.eliminates_envy) {
        DirectionStatus::Eliminable
    } else {
        DirectionStatus::Failed
    };
    debug!(
        envious = %envious.agent,
        envied = %envied,
        needed,
        candidates = candidates.len(),
        status = %check.status,
        "envy direction checked"
    );
    DirectionOutcome { check, candidates }
}

/// Decides EF[1,1] from both agents' aggregates.
pub fn resolve(aggregates: &Aggregates, config: &CertifierConfig) -> Verdict {
    let first = &aggregates.first;
    let second = &aggregates.second;

    let mut verdict = Verdict {
        is_ef11: true,
        violating_pair: None,
        swap_pairs: BTreeMap::from([
            (first.agent.clone(), Vec::new()),
            (second.agent.clone(), Vec::new()),
        ]),
        bundle_values: BTreeMap::from([
            (first.agent.clone(), bundle_values(first)),
            (second.agent.clone(), bundle_values(second)),
        ]),
        directions: [
            DirectionCheck::pending(&first.agent, &second.agent),
            DirectionCheck::pending(&second.agent, &first.agent),
        ],
    };

    for (slot, (envious, envied)) in [(first, second), (second, first)].into_iter().enumerate() {
        let outcome = check_direction(envious, &envied.agent, config);
        let failed = outcome.check.status == DirectionStatus::Failed;
        verdict
            .swap_pairs
            .insert(envious.agent.clone(), outcome.candidates);
        verdict.directions[slot] = outcome.check;

        if failed {
            verdict.is_ef11 = false;
            if verdict.violating_pair.is_none() {
                verdict.violating_pair = Some((envious.agent.clone(), envied.agent.clone()));
            }
            if config.mode == DirectionMode::ShortCircuit {
                break;
            }
        }
    }
    verdict
}

fn bundle_values(aggregate: &AgentAggregate) -> BundleValues {
    BundleValues {
        own_value: aggregate.own_value,
        other_value: aggregate.other_value,
        gap: aggregate.gap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Extremum;
    use crate::types::{Category, ItemId};

    fn init_test(test_name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(test_name);
    }

    fn extremum(item: &str, value: f64) -> Extremum {
        Extremum {
            item: ItemId::new(item),
            value,
        }
    }

    fn aggregate(
        agent: &str,
        own: f64,
        other: f64,
        chores: &[(&str, &str, f64)],
        goods: &[(&str, &str, f64)],
    ) -> AgentAggregate {
        AgentAggregate {
            agent: AgentId::new(agent),
            own_value: own,
            other_value: other,
            worst_chore_own: chores
                .iter()
                .map(|(c, i, v)| (Category::named(*c), extremum(i, *v)))
                .collect(),
            best_good_other: goods
                .iter()
                .map(|(c, i, v)| (Category::named(*c), extremum(i, *v)))
                .collect(),
        }
    }

    #[test]
    fn no_envy_records_nothing() {
        init_test("no_envy_records_nothing");
        let a = aggregate("A", 1.0, 1.0, &[("c", "x", -1.0)], &[("c", "y", 2.0)]);
        let outcome = check_direction(&a, &AgentId::new("B"), &CertifierConfig::default());
        crate::assert_with_log!(
            outcome.check.status == DirectionStatus::NoEnvy,
            "gap of zero is envy-free",
            DirectionStatus::NoEnvy,
            outcome.check.status
        );
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.check.needed, None);
        crate::test_complete!("no_envy_records_nothing");
    }

    #[test]
    fn gain_exactly_needed_eliminates() {
        init_test("gain_exactly_needed_eliminates");
        // gap = -3 - 2 = -5, gain = 2 - (-3) = 5.
        let a = aggregate("A", -3.0, 2.0, &[("c", "x", -3.0)], &[("c", "y", 2.0)]);
        let outcome = check_direction(&a, &AgentId::new("B"), &CertifierConfig::default());
        assert_eq!(outcome.check.needed, Some(5.0));
        assert_eq!(outcome.candidates.len(), 1);
        let candidate = &outcome.candidates[0];
        crate::assert_with_log!(candidate.gain == 5.0, "gain", 5.0, candidate.gain);
        assert!(candidate.eliminates_envy);
        assert_eq!(outcome.check.status, DirectionStatus::Eliminable);
        crate::test_complete!("gain_exactly_needed_eliminates");
    }

    #[test]
    fn only_shared_categories_are_candidates() {
        init_test("only_shared_categories_are_candidates");
        let a = aggregate(
            "A",
            -10.0,
            5.0,
            &[("c1", "x1", -4.0), ("c2", "x2", -1.0), ("c3", "x3", -2.0)],
            &[("c2", "y2", 1.0), ("c3", "y3", 3.0), ("c4", "y4", 9.0)],
        );
        let outcome = check_direction(&a, &AgentId::new("B"), &CertifierConfig::default());
        let cats: Vec<String> = outcome
            .candidates
            .iter()
            .map(|c| c.category.to_string())
            .collect();
        assert_eq!(cats, ["c2", "c3"]);
        assert!(outcome.candidates.iter().all(|c| !c.eliminates_envy));
        assert_eq!(outcome.check.status, DirectionStatus::Failed);
        crate::test_complete!("only_shared_categories_are_candidates");
    }

    #[test]
    fn short_circuit_skips_reverse_direction() {
        init_test("short_circuit_skips_reverse_direction");
        let aggregates = Aggregates {
            first: aggregate("A", -5.0, 0.0, &[], &[]),
            second: aggregate("B", -5.0, 0.0, &[], &[]),
        };
        let verdict = resolve(&aggregates, &CertifierConfig::default());
        assert!(!verdict.is_ef11);
        assert_eq!(
            verdict.violating_pair,
            Some((AgentId::new("A"), AgentId::new("B")))
        );
        crate::assert_with_log!(
            verdict.directions[1].status == DirectionStatus::NotChecked,
            "reverse direction untouched",
            DirectionStatus::NotChecked,
            verdict.directions[1].status
        );
        assert!(verdict.swap_pairs_for(&AgentId::new("B")).is_empty());
        crate::test_complete!("short_circuit_skips_reverse_direction");
    }

    #[test]
    fn exhaustive_mode_checks_both() {
        init_test("exhaustive_mode_checks_both");
        let aggregates = Aggregates {
            first: aggregate("A", -5.0, 0.0, &[], &[]),
            second: aggregate("B", -1.0, 0.0, &[("c", "x", -1.0)], &[("c", "y", 1.0)]),
        };
        let verdict = resolve(&aggregates, &CertifierConfig::default().exhaustive());
        assert!(!verdict.is_ef11);
        assert_eq!(
            verdict.violating_pair,
            Some((AgentId::new("A"), AgentId::new("B")))
        );
        assert_eq!(verdict.directions[1].status, DirectionStatus::Eliminable);
        assert_eq!(verdict.swap_pairs_for(&AgentId::new("B")).len(), 1);
        crate::test_complete!("exhaustive_mode_checks_both");
    }

    #[test]
    fn exhaustive_reports_second_failure() {
        init_test("exhaustive_reports_second_failure");
        let aggregates = Aggregates {
            first: aggregate("A", 0.0, 0.0, &[], &[]),
            second: aggregate("B", -1.0, 0.0, &[], &[]),
        };
        let verdict = resolve(&aggregates, &CertifierConfig::default().exhaustive());
        assert_eq!(
            verdict.violating_pair,
            Some((AgentId::new("B"), AgentId::new("A")))
        );
        assert_eq!(verdict.directions[0].status, DirectionStatus::NoEnvy);
        crate::test_complete!("exhaustive_reports_second_failure");
    }

    #[test]
    fn bundle_values_are_reported() {
        init_test("bundle_values_are_reported");
        let aggregates = Aggregates {
            first: aggregate("A", 2.0, -1.0, &[], &[]),
            second: aggregate("B", 0.5, 0.25, &[], &[]),
        };
        let verdict = resolve(&aggregates, &CertifierConfig::default());
        assert!(verdict.is_ef11);
        let a = verdict.bundle_values_for(&AgentId::new("A")).unwrap();
        assert_eq!((a.own_value, a.other_value, a.gap), (2.0, -1.0, 3.0));
        let b = verdict.bundle_values_for(&AgentId::new("B")).unwrap();
        assert_eq!(b.gap, 0.25);
        crate::test_complete!("bundle_values_are_reported");
    }
}
