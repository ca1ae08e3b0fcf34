//! ef11: a certifier for EF[1,1] fairness of two-agent mixed allocations.
//!
//! # Overview
//!
//! Two agents split a set of indivisible items. Each agent values every
//! item with a real number: positive values are goods, negative values are
//! chores. Items carry categories. An allocation is EF[1,1] when, for each
//! envious agent, removing one chore from its own bundle and one good from
//! the other bundle, both from the same category, cancels the envy.
//!
//! The certifier answers that question in one pass over the allocation and
//! reports why: per-agent bundle values, every candidate swap considered,
//! and the first ordered pair that could not be repaired.
//!
//! # Module Structure
//!
//! - [`types`]: Agent, item, and category identifiers; the two-bundle [`Allocation`]
//! - [`oracle`]: Valuation and category lookup traits with table-backed impls
//! - [`aggregate`]: Per-agent bundle sums and per-category extreme items
//! - [`resolve`]: Swap discovery and envy resolution
//! - [`verdict`]: The certifier's output records
//! - [`certifier`]: Entry points tying aggregation and resolution together
//! - [`config`]: Direction mode and numeric tolerance
//! - [`instance`]: Problem instances, case documents, and item tables
//! - [`render`]: One-line and paragraph verdict summaries
//! - [`error`](mod@error): Error types
//! - [`tracing_compat`]: Optional tracing integration (requires `tracing-integration` feature)
//!
//! # Example
//!
//! ```
//! use ef11::{Allocation, ItemCategories, Valuations, certify};
//!
//! let valuations = Valuations::new()
//!     .with("A", [("x", -3.0), ("y", 2.0)])
//!     .with("B", [("x", 1.0), ("y", 1.0)]);
//! let categories = ItemCategories::from_pairs([("x", "chores"), ("y", "chores")]);
//! let allocation = Allocation::from_entries([("A", ["x"]), ("B", ["y"])]).unwrap();
//!
//! let verdict = certify(&allocation, &valuations, &categories).unwrap();
//! assert!(verdict.is_ef11);
//! assert_eq!(verdict.eliminating_swaps(&"A".into()).count(), 1);
//! ```

pub mod aggregate;
pub mod certifier;
pub mod config;
pub mod error;
pub mod instance;
pub mod oracle;
pub mod render;
pub mod resolve;
pub mod tracing_compat;
pub mod types;
pub mod verdict;

// ── Test-only modules ───────────────────────────────────────────────────
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use certifier::{Certifier, certify};
pub use config::{CertifierConfig, DirectionMode};
pub use error::{CertifyError, ConfigError};
pub use instance::{Case, CategorySummary, Instance, ItemDetail};
pub use oracle::{CategoryLookup, ItemCategories, Uncategorized, ValuationOracle, Valuations};
pub use types::{AgentId, Allocation, Bundle, Category, ItemId};
pub use verdict::{BundleValues, DirectionCheck, DirectionStatus, SwapCandidate, Verdict};
