//! The EF[1,1] certifier entry points.
//!
//! [`certify`] runs the exact, short-circuiting check. [`Certifier`] carries
//! a validated [`CertifierConfig`] for callers that need tolerance or
//! exhaustive reporting.

use crate::aggregate::aggregate;
use crate::config::CertifierConfig;
use crate::error::{CertifyError, ConfigError};
use crate::oracle::{CategoryLookup, ValuationOracle};
use crate::resolve::resolve;
use crate::tracing_compat::info;
use crate::types::Allocation;
use crate::verdict::Verdict;

/// Certifies `allocation` with the default configuration.
///
/// ```
/// use ef11::{Allocation, Uncategorized, Valuations, certify};
///
/// let valuations = Valuations::new()
///     .with("A", [("x", 1.0), ("y", 1.0)])
///     .with("B", [("x", 1.0), ("y", 1.0)]);
/// let allocation = Allocation::from_entries([("A", ["x"]), ("B", ["y"])]).unwrap();
/// let verdict = certify(&allocation, &valuations, &Uncategorized).unwrap();
/// assert!(verdict.is_ef11);
/// ```
pub fn certify<V, L>(
    allocation: &Allocation,
    oracle: &V,
    categories: &L,
) -> Result<Verdict, CertifyError>
where
    V: ValuationOracle + ?Sized,
    L: CategoryLookup + ?Sized,
{
    Certifier::default().certify(allocation, oracle, categories)
}

/// A configured certifier.
///
/// Holds no state besides its configuration; one instance can certify any
/// number of allocations, from any number of threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Certifier {
    config: CertifierConfig,
}

impl Certifier {
    /// Creates a certifier after validating `config`.
    pub fn new(config: CertifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &CertifierConfig {
        &self.config
    }

    /// Aggregates valuations over `allocation` and resolves envy.
    pub fn certify<V, L>(
        &self,
        allocation: &Allocation,
        oracle: &V,
        categories: &L,
    ) -> Result<Verdict, CertifyError>
    where
        V: ValuationOracle + ?Sized,
        L: CategoryLookup + ?Sized,
    {
        let aggregates = aggregate(allocation, oracle, categories)?;
        let verdict = resolve(&aggregates, &self.config);
        info!(
            first = %allocation.first().agent(),
            second = %allocation.second().agent(),
            items = allocation.item_count(),
            mode = self.config.mode.as_str(),
            is_ef11 = verdict.is_ef11,
            "allocation certified"
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirectionMode;
    use crate::oracle::{Uncategorized, Valuations};

    #[test]
    fn new_validates_config() {
        crate::test_utils::init_test_logging();
        crate::test_phase!("new_validates_config");
        let bad = CertifierConfig {
            mode: DirectionMode::ShortCircuit,
            tolerance: -1.0,
        };
        assert!(Certifier::new(bad).is_err());
        let good = Certifier::new(CertifierConfig::default().exhaustive()).unwrap();
        assert_eq!(good.config().mode, DirectionMode::Exhaustive);
        crate::test_complete!("new_validates_config");
    }

    #[test]
    fn tolerance_absorbs_float_noise() {
        crate::test_utils::init_test_logging();
        crate::test_phase!("tolerance_absorbs_float_noise");
        // 0.1 + 0.2 > 0.3 in binary floating point, so A envies B by ~5e-17.
        let valuations = Valuations::new()
            .with("A", [("x", 0.1), ("y", 0.2), ("z", 0.3)])
            .with("B", [("x", 0.0), ("y", 0.0), ("z", 0.0)]);
        let allocation =
            Allocation::from_entries([("A", vec!["z"]), ("B", vec!["x", "y"])]).unwrap();

        let exact = certify(&allocation, &valuations, &Uncategorized).unwrap();
        crate::assert_with_log!(
            !exact.is_ef11,
            "exact comparison sees envy",
            false,
            exact.is_ef11
        );

        let lenient = Certifier::new(CertifierConfig {
            mode: DirectionMode::ShortCircuit,
            tolerance: 1e-9,
        })
        .unwrap()
        .certify(&allocation, &valuations, &Uncategorized)
        .unwrap();
        assert!(lenient.is_ef11);
        crate::test_complete!("tolerance_absorbs_float_noise");
    }
}
