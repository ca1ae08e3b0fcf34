//! Certifier configuration.
//!
//! The defaults reproduce the exact, short-circuiting check. Two knobs exist:
//!
//! - [`DirectionMode`]: whether the reverse envy direction is still
//!   evaluated after the first direction fails.
//! - `tolerance`: slack applied to both the "no envy" test and the
//!   "swap eliminates envy" test, for valuations carrying float noise.
//!
//! With the `config-file` feature the configuration can be read from TOML:
//!
//! ```toml
//! mode = "exhaustive"
//! tolerance = 1e-9
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How many envy directions are evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionMode {
    /// Stop at the first direction whose envy cannot be eliminated.
    #[default]
    ShortCircuit,
    /// Always evaluate both directions, for symmetric diagnostics.
    Exhaustive,
}

impl DirectionMode {
    /// Returns the mode name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShortCircuit => "short_circuit",
            Self::Exhaustive => "exhaustive",
        }
    }
}

/// Configuration for a certification run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CertifierConfig {
    /// Direction evaluation mode.
    pub mode: DirectionMode,
    /// Non-negative slack for envy comparisons.
    pub tolerance: f64,
}

impl Default for CertifierConfig {
    fn default() -> Self {
        Self {
            mode: DirectionMode::ShortCircuit,
            tolerance: 0.0,
        }
    }
}

impl CertifierConfig {
    /// Creates a validated configuration.
    pub fn new(mode: DirectionMode, tolerance: f64) -> Result<Self, ConfigError> {
        let config = Self { mode, tolerance };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with the exhaustive direction mode.
    #[must_use]
    pub fn exhaustive(mut self) -> Self {
        self.mode = DirectionMode::Exhaustive;
        self
    }

    /// Checks that `tolerance` is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::ToleranceOutOfRange {
                value: self.tolerance,
            });
        }
        Ok(())
    }

    /// Whether an envy gap counts as no envy.
    pub(crate) fn is_envy_free(&self, gap: f64) -> bool {
        gap >= -self.tolerance
    }

    /// Whether a swap gain cancels the needed amount.
    pub(crate) fn clears(&self, gain: f64, needed: f64) -> bool {
        gain + self.tolerance >= needed
    }

    /// Parses and validates a TOML configuration.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML configuration file.
    #[cfg(feature = "config-file")]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}
