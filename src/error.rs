//! Error types for the certifier.
//!
//! Every failure is fatal: the certifier is a pure function, so nothing is
//! retried or recovered internally. Callers decide how to present the error.

use crate::types::{AgentId, ItemId};
use thiserror::Error;

/// An error that prevents a verdict from being produced.
///
/// ```
/// use ef11::{AgentId, CertifyError, ItemId};
///
/// let err = CertifyError::UnknownValuation {
///     agent: AgentId::new("Agent1"),
///     item: ItemId::new("o7"),
/// };
/// assert!(err.to_string().contains("o7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertifyError {
    /// The allocation does not name exactly two distinct agents.
    #[error("allocation must contain exactly two distinct agents, found {found}")]
    InsufficientAgents {
        /// Number of distinct agents present.
        found: usize,
    },
    /// The valuation oracle cannot price an item that appears in the allocation.
    #[error("no valuation for agent {agent} and item {item}")]
    UnknownValuation {
        /// Agent whose perspective was requested.
        agent: AgentId,
        /// Item that could not be priced.
        item: ItemId,
    },
    /// The category source has no entry for an allocated item.
    #[error("item {item} has no category mapping")]
    CategoryLookup {
        /// Item missing from the category source.
        item: ItemId,
    },
}

impl CertifyError {
    /// Returns true if the error comes from malformed allocation shape.
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        matches!(self, Self::InsufficientAgents { .. })
    }

    /// Returns the offending item, if the error concerns one.
    #[must_use]
    pub fn item(&self) -> Option<&ItemId> {
        match self {
            Self::InsufficientAgents { .. } => None,
            Self::UnknownValuation { item, .. } | Self::CategoryLookup { item } => Some(item),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Tolerance must be finite and non-negative.
    #[error("tolerance {value} out of valid range (must be finite and >= 0)")]
    ToleranceOutOfRange {
        /// The rejected tolerance.
        value: f64,
    },
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {message}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
    /// The configuration text is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_context() {
        crate::test_utils::init_test_logging();
        crate::test_phase!("display_mentions_context");
        let err = CertifyError::InsufficientAgents { found: 3 };
        let msg = err.to_string();
        crate::assert_with_log!(msg.contains('3'), "count in message", true, msg.contains('3'));
        assert!(err.is_shape_error());
        assert!(err.item().is_none());

        let err = CertifyError::CategoryLookup {
            item: ItemId::new("o9"),
        };
        assert!(err.to_string().contains("o9"));
        assert_eq!(err.item(), Some(&ItemId::new("o9")));
        assert!(!err.is_shape_error());
        crate::test_complete!("display_mentions_context");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::ToleranceOutOfRange { value: -0.5 };
        assert!(format!("{err}").contains("-0.5"));
    }
}
