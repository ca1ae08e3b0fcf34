//! Command implementations behind the `ef11` binary.
//!
//! Each command returns a [`Report`]: the text to print and the process
//! exit code it implies. Load and configuration failures come back as
//! `Err(String)` and map to [`EXIT_ERROR`].

use clap::Args;
use ef11::{Allocation, Case, Certifier, CertifierConfig, DirectionMode, Verdict, render};
use std::fs;
use std::path::{Path, PathBuf};

/// Exit code when the allocation is EF[1,1] (or a command succeeded).
pub const EXIT_EF11: u8 = 0;
/// Exit code when the allocation is not EF[1,1].
pub const EXIT_NOT_EF11: u8 = 1;
/// Exit code for unreadable input, bad configuration, or invalid cases.
pub const EXIT_ERROR: u8 = 2;

const WORKED_EXAMPLE: &str = include_str!("../fixtures/worked_example.yaml");

/// Output of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Text for stdout.
    pub text: String,
    /// Process exit code.
    pub code: u8,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty JSON.
    Json,
    /// Plain text.
    Plain,
    /// Text with ANSI colors.
    Ansi,
}

/// Certifier options shared by commands that produce verdicts.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// TOML file with `mode` and `tolerance`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Evaluate both envy directions even after one fails
    #[arg(long)]
    pub exhaustive: bool,

    /// Slack for envy comparisons (overrides the config file)
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl ConfigArgs {
    /// Builds a certifier from the config file, then applies flag overrides.
    pub fn certifier(&self) -> Result<Certifier, String> {
        let mut config = match &self.config {
            Some(path) => CertifierConfig::load(path).map_err(|e| e.to_string())?,
            None => CertifierConfig::default(),
        };
        if self.exhaustive {
            config.mode = DirectionMode::Exhaustive;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        Certifier::new(config).map_err(|e| format!("Invalid configuration: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Case loading
// ---------------------------------------------------------------------------

/// Reads a case document; `.json` files are JSON, anything else is YAML.
pub fn load_case(path: &Path) -> Result<Case, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let parsed = if is_json {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| {
        format!(
            "Failed to parse {}: {e}. Hint: a case needs `valuations` and an `allocation` with two agents",
            path.display()
        )
    })
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

fn verdict_code(verdict: &Verdict) -> u8 {
    if verdict.is_ef11 {
        EXIT_EF11
    } else {
        EXIT_NOT_EF11
    }
}

fn format_verdict(case: &Case, verdict: &Verdict, format: OutputFormat, items: bool) -> String {
    match format {
        OutputFormat::Json => {
            let mut report = serde_json::json!({ "verdict": verdict });
            if items {
                report["items"] = serde_json::json!(case.item_details());
                report["categories"] = serde_json::json!(case.category_summaries());
            }
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Plain | OutputFormat::Ansi => {
            let mut text = if format == OutputFormat::Ansi {
                render::level1(verdict)
            } else {
                render::level1_plain(verdict)
            };
            if items {
                text.push('\n');
                text.push_str(&render::item_table(
                    &case.item_details(),
                    case.allocation.agents(),
                ));
            }
            text.trim_end().to_string()
        }
    }
}

/// Certifies the case at `path`.
pub fn cmd_check(
    path: &Path,
    config: &ConfigArgs,
    format: OutputFormat,
    items: bool,
) -> Result<Report, String> {
    let certifier = config.certifier()?;
    let case = load_case(path)?;
    let verdict = case
        .certify(&certifier)
        .map_err(|e| format!("Cannot certify {}: {e}", path.display()))?;
    tracing::debug!(case = %path.display(), is_ef11 = verdict.is_ef11, "case checked");
    Ok(Report {
        text: format_verdict(&case, &verdict, format, items),
        code: verdict_code(&verdict),
    })
}

// ---------------------------------------------------------------------------
// Validate
// ---------------------------------------------------------------------------

/// Loads and validates the case at `path` without certifying it.
pub fn cmd_validate(path: &Path, format: OutputFormat) -> Result<Report, String> {
    let case = load_case(path)?;
    let result = case.validate();
    let items = case.allocation.item_count();
    let categories = case.category_summaries().len();

    let text = if format == OutputFormat::Json {
        let report = serde_json::json!({
            "case": path.display().to_string(),
            "valid": result.is_ok(),
            "agents": case.allocation.agents(),
            "items": items,
            "categories": categories,
            "error": result.as_ref().err().map(ToString::to_string),
        });
        serde_json::to_string_pretty(&report).unwrap_or_default()
    } else {
        match &result {
            Ok(()) => format!(
                "Case '{}' is valid ({} and {}, {items} items, {categories} categories)",
                path.display(),
                case.allocation.first().agent(),
                case.allocation.second().agent(),
            ),
            Err(e) => format!("Case '{}' is invalid: {e}", path.display()),
        }
    };

    Ok(Report {
        text,
        code: if result.is_ok() { EXIT_EF11 } else { EXIT_ERROR },
    })
}

// ---------------------------------------------------------------------------
// Demo
// ---------------------------------------------------------------------------

/// Certifies the built-in worked example under its two reference allocations.
pub fn cmd_demo(config: &ConfigArgs, format: OutputFormat) -> Result<Report, String> {
    let certifier = config.certifier()?;
    let base: Case = serde_yaml::from_str(WORKED_EXAMPLE)
        .map_err(|e| format!("Built-in example is malformed: {e}"))?;
    let holds = Allocation::from_entries([
        ("Agent1", ["o2", "o3", "o6"]),
        ("Agent2", ["o1", "o4", "o5"]),
    ])
    .map_err(|e| e.to_string())?;
    let runs = [("fails", base.allocation.clone()), ("holds", holds)];

    let mut sections = Vec::with_capacity(runs.len());
    let mut json_runs = Vec::with_capacity(runs.len());
    for (label, allocation) in runs {
        let case = Case {
            instance: base.instance.clone(),
            allocation,
        };
        let verdict = case.certify(&certifier).map_err(|e| e.to_string())?;
        if format == OutputFormat::Json {
            json_runs.push(serde_json::json!({
                "label": label,
                "allocation": case.allocation,
                "verdict": verdict,
            }));
        } else {
            sections.push(format!(
                "--- allocation '{label}' ---\n{}",
                format_verdict(&case, &verdict, format, true)
            ));
        }
    }

    let text = if format == OutputFormat::Json {
        serde_json::to_string_pretty(&json_runs).unwrap_or_default()
    } else {
        format!("=== EF[1,1] worked example ===\n\n{}", sections.join("\n\n"))
    };
    Ok(Report {
        text,
        code: EXIT_EF11,
    })
}
