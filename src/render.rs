//! Human-readable rendering of verdicts and item tables.
//!
//! - **Level 0** (one-liner): fits in a single 120-char terminal line.
//! - **Level 1** (paragraph): multi-line block, with or without ANSI colors.
//! - **Item table**: aligned plain-text table of [`ItemDetail`] rows.
//!
//! Rendering is deterministic: identical inputs produce identical output.
//!
//! # Example
//!
//! ```
//! use ef11::{Allocation, Uncategorized, Valuations, certify, render};
//!
//! let valuations = Valuations::new()
//!     .with("A", [("x", 1.0), ("y", 1.0)])
//!     .with("B", [("x", 1.0), ("y", 1.0)]);
//! let allocation = Allocation::from_entries([("A", ["x"]), ("B", ["y"])]).unwrap();
//! let verdict = certify(&allocation, &valuations, &Uncategorized).unwrap();
//!
//! let line = render::level0(&verdict);
//! assert!(line.len() <= 120);
//! assert!(render::level1_plain(&verdict).contains("no envy"));
//! ```

use crate::instance::ItemDetail;
use crate::types::AgentId;
use crate::verdict::{DirectionStatus, SwapCandidate, Verdict};
use std::fmt::Write;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

const LEVEL0_MAX: usize = 120;

/// Render a Level 0 one-liner (no ANSI, max 120 chars).
///
/// `EF[1,1] holds (A: gap 1.00, B: gap 0.00)` or
/// `EF[1,1] fails: A envies B by 10.00, 0 of 0 swaps suffice`.
#[must_use]
pub fn level0(verdict: &Verdict) -> String {
    let line = match &verdict.violating_pair {
        None => {
            let gaps: Vec<String> = verdict
                .bundle_values
                .iter()
                .map(|(agent, values)| format!("{agent}: gap {:.2}", values.gap))
                .collect();
            format!("EF[1,1] holds ({})", gaps.join(", "))
        }
        Some((envious, envied)) => {
            let needed = verdict
                .direction_for(envious)
                .and_then(|d| d.needed)
                .unwrap_or_default();
            let candidates = verdict.swap_pairs_for(envious);
            let eliminating = candidates.iter().filter(|c| c.eliminates_envy).count();
            format!(
                "EF[1,1] fails: {envious} envies {envied} by {needed:.2}, {eliminating} of {} swaps suffice",
                candidates.len()
            )
        }
    };
    truncate(line, LEVEL0_MAX)
}

/// Render a Level 0 one-liner with ANSI colors.
#[must_use]
pub fn level0_ansi(verdict: &Verdict) -> String {
    let plain = level0(verdict);
    let (color, label) = if verdict.is_ef11 {
        (GREEN, "EF[1,1] holds")
    } else {
        (RED, "EF[1,1] fails")
    };
    plain.replacen(label, &format!("{BOLD}{color}{label}{RESET}"), 1)
}

/// Render a Level 1 paragraph with ANSI colors.
#[must_use]
pub fn level1(verdict: &Verdict) -> String {
    paragraph(verdict, true)
}

/// Render a Level 1 paragraph without ANSI colors.
#[must_use]
pub fn level1_plain(verdict: &Verdict) -> String {
    paragraph(verdict, false)
}

fn paragraph(verdict: &Verdict, ansi: bool) -> String {
    let paint = |code: &'static str| if ansi { code } else { "" };
    let (reset, bold, dim, cyan) = (paint(RESET), paint(BOLD), paint(DIM), paint(CYAN));
    let mut out = String::with_capacity(512);

    let (headline_color, headline) = if verdict.is_ef11 {
        (GREEN, "EF[1,1]: yes")
    } else {
        (RED, "EF[1,1]: no")
    };
    let _ = writeln!(out, "{bold}{}{headline}{reset}", paint(headline_color));
    if let Some((envious, envied)) = &verdict.violating_pair {
        let _ = writeln!(out, "  violating pair: {bold}{envious}{reset} envies {bold}{envied}{reset}");
    }

    let _ = writeln!(out, "  bundle values:");
    for (agent, values) in &verdict.bundle_values {
        let _ = writeln!(
            out,
            "    {cyan}{agent}{reset}: own {:.4}  other {:.4}  gap {bold}{:.4}{reset}",
            values.own_value, values.other_value, values.gap,
        );
    }

    let _ = writeln!(out, "  directions:");
    for check in &verdict.directions {
        let color = paint(status_color(check.status));
        let _ = write!(
            out,
            "    {}{dim} -> {reset}{}: {color}{}{reset}",
            check.envious, check.envied, check.status,
        );
        if let Some(needed) = check.needed {
            let _ = write!(out, " {dim}(needed {needed:.4}){reset}");
        }
        let _ = writeln!(out);

        for candidate in verdict.swap_pairs_for(&check.envious) {
            let _ = writeln!(out, "      {}", swap_line(candidate, ansi));
        }
    }
    out
}

fn swap_line(candidate: &SwapCandidate, ansi: bool) -> String {
    let (mark, color) = if candidate.eliminates_envy {
        ("ok", GREEN)
    } else {
        ("short", YELLOW)
    };
    let (color, reset) = if ansi { (color, RESET) } else { ("", "") };
    format!(
        "[{}] drop {} ({:.4}) / {} ({:.4}), gain {:.4} {color}{mark}{reset}",
        candidate.category,
        candidate.remove_from_own,
        candidate.chore_value,
        candidate.remove_from_other,
        candidate.good_value,
        candidate.gain,
    )
}

const fn status_color(status: DirectionStatus) -> &'static str {
    match status {
        DirectionStatus::NotChecked => DIM,
        DirectionStatus::NoEnvy | DirectionStatus::Eliminable => GREEN,
        DirectionStatus::Failed => RED,
    }
}

/// Render item rows as an aligned plain-text table.
///
/// Columns: item, category, one value column per agent, holder. Missing
/// valuations show as `-`.
#[must_use]
pub fn item_table(rows: &[ItemDetail], agents: [&AgentId; 2]) -> String {
    let mut header = vec!["item".to_string(), "category".to_string()];
    header.extend(agents.iter().map(ToString::to_string));
    header.push("holder".to_string());

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.item.to_string(), row.category.to_string()];
            cells.extend(agents.iter().map(|agent| {
                row.values
                    .get(*agent)
                    .copied()
                    .flatten()
                    .map_or_else(|| "-".to_string(), |v| format!("{v}"))
            }));
            cells.push(
                row.allocated_to
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string),
            );
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for cells in std::iter::once(&header).chain(&body) {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

fn truncate(line: String, max: usize) -> String {
    if line.chars().count() <= max {
        return line;
    }
    let mut truncated: String = line.chars().take(max - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certifier::Certifier;
    use crate::instance::Case;

    const FAILING: &str = r#"{
        "valuations": {
            "Agent1": {"o1": 0, "o2": -1, "o3": -4, "o4": -5, "o5": 0, "o6": 2},
            "Agent2": {"o1": 0, "o2": -1, "o3": -2, "o4": -1, "o5": -1, "o6": 0}
        },
        "item_categories": {"o1": "cat1", "o2": "cat1", "o3": "cat1", "o4": "cat1", "o5": "cat2", "o6": "cat2"},
        "allocation": {"Agent1": ["o3", "o4", "o5"], "Agent2": ["o1", "o2", "o6"]}
    }"#;

    fn failing_case() -> Case {
        serde_json::from_str(FAILING).unwrap()
    }

    fn failing_verdict() -> Verdict {
        failing_case().certify(&Certifier::default()).unwrap()
    }

    fn passing_verdict() -> Verdict {
        let mut case = failing_case();
        case.allocation =
            serde_json::from_str(r#"{"Agent1": ["o2", "o3", "o6"], "Agent2": ["o1", "o4", "o5"]}"#)
                .unwrap();
        case.certify(&Certifier::default()).unwrap()
    }

    #[test]
    fn level0_reports_violation() {
        crate::test_utils::init_test_logging();
        let line = level0(&failing_verdict());
        crate::assert_with_log!(
            line == "EF[1,1] fails: Agent1 envies Agent2 by 10.00, 0 of 0 swaps suffice",
            "failing one-liner",
            "EF[1,1] fails: Agent1 envies Agent2 by 10.00, 0 of 0 swaps suffice",
            line
        );
    }

    #[test]
    fn level0_reports_gaps_when_holding() {
        let line = level0(&passing_verdict());
        assert_eq!(line, "EF[1,1] holds (Agent1: gap 2.00, Agent2: gap 1.00)");
        assert!(!line.contains("\x1b["));
    }

    #[test]
    fn level0_truncates_long_output() {
        let mut verdict = failing_verdict();
        verdict.violating_pair = Some((AgentId::new("a".repeat(200)), AgentId::new("b")));
        let line = level0(&verdict);
        assert_eq!(line.chars().count(), 120);
        assert!(line.ends_with("..."));
    }

    #[test]
    fn level0_ansi_contains_escape_codes() {
        let line = level0_ansi(&failing_verdict());
        assert!(line.contains(RED));
        assert!(line.contains("Agent1"));
    }

    #[test]
    fn level1_lists_directions() {
        let output = level1(&failing_verdict());
        assert!(output.lines().count() >= 6, "level1 should be multi-line");
        assert!(output.contains("violating pair"));
        assert!(output.contains("failed"));
        assert!(output.contains("not checked"));
        assert!(output.contains(RED));
    }

    #[test]
    fn level1_plain_no_ansi() {
        let output = level1_plain(&passing_verdict());
        assert!(!output.contains("\x1b["));
        assert!(output.starts_with("EF[1,1]: yes"));
        assert!(output.contains("Agent1 -> Agent2: no envy"));
    }

    #[test]
    fn level1_shows_swap_candidates() {
        let case: Case = serde_json::from_str(
            r#"{
                "valuations": {"A": {"x": -3, "y": 2}, "B": {"x": 1, "y": 1}},
                "item_categories": {"x": "c", "y": "c"},
                "allocation": {"A": ["x"], "B": ["y"]}
            }"#,
        )
        .unwrap();
        let verdict = case.certify(&Certifier::default()).unwrap();
        assert!(verdict.is_ef11);
        let output = level1_plain(&verdict);
        assert!(output.contains("[c] drop x (-3.0000) / y (2.0000), gain 5.0000 ok"));
        assert!(output.contains("(needed 5.0000)"));
    }

    #[test]
    fn item_table_aligns_columns() {
        let case = failing_case();
        let table = item_table(&case.item_details(), case.allocation.agents());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("item  category  Agent1  Agent2  holder"));
        assert!(lines[1].starts_with("o1    cat1"));
        assert!(lines[6].ends_with("Agent2"));
    }

    #[test]
    fn deterministic_output() {
        let verdict = failing_verdict();
        assert_eq!(level0(&verdict), level0(&verdict));
        assert_eq!(level1(&verdict), level1(&verdict));
    }
}
