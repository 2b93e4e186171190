//! Bootstrap configuration.
//!
//! Conventions and solver limits used by the [`Bootstrapper`], loadable from TOML:
//!
//! ```toml
//! deposit_day_count = "ACT/360"
//! future_day_count = "ACT/360"
//! swap_day_count = "30E/360"
//! swap_frequency = 1
//!
//! [solver]
//! tolerance = 1e-12
//! max_iterations = 100
//! ```
//!
//! Every field is optional and falls back to the defaults shown.
//!
//! [`Bootstrapper`]: crate::bootstrap::Bootstrapper

use std::path::Path;

use ratekit_core::daycounts::DayCountConvention;
use ratekit_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Conventions and solver limits for curve bootstrapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Accrual convention of deposit quotes
    #[serde(default = "default_money_market_day_count")]
    pub deposit_day_count: DayCountConvention,

    /// Accrual convention of futures quotes
    #[serde(default = "default_money_market_day_count")]
    pub future_day_count: DayCountConvention,

    /// Accrual convention of the swaps' fixed leg
    #[serde(default = "default_swap_day_count")]
    pub swap_day_count: DayCountConvention,

    /// Fixed-leg payments per year
    #[serde(default = "default_swap_frequency")]
    pub swap_frequency: u32,

    /// Root-finding limits for swaps and futures that need a numerical solve
    #[serde(default)]
    pub solver: SolverSettings,
}

/// Root-finding limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Absolute tolerance on the repricing residual
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_money_market_day_count() -> DayCountConvention {
    DayCountConvention::Act360
}

fn default_swap_day_count() -> DayCountConvention {
    DayCountConvention::Thirty360E
}

fn default_swap_frequency() -> u32 {
    1
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_max_iterations() -> u32 {
    100
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            deposit_day_count: default_money_market_day_count(),
            future_day_count: default_money_market_day_count(),
            swap_day_count: default_swap_day_count(),
            swap_frequency: default_swap_frequency(),
            solver: SolverSettings::default(),
        }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl SolverSettings {
    /// Converts to the math crate's solver configuration.
    #[must_use]
    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

impl BootstrapConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> CurveResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CurveError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CurveError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> CurveResult<()> {
        if !(1..=12).contains(&self.swap_frequency) {
            return Err(CurveError::config(format!(
                "swap_frequency must be between 1 and 12, got {}",
                self.swap_frequency
            )));
        }
        self.solver
            .to_solver_config()
            .validate()
            .map_err(|e| CurveError::config(e.to_string()))
    }

    /// Sets the fixed-leg payment frequency.
    #[must_use]
    pub fn with_swap_frequency(mut self, frequency: u32) -> Self {
        self.swap_frequency = frequency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = BootstrapConfig::from_toml_str("").unwrap();
        assert_eq!(config, BootstrapConfig::default());
        assert_eq!(config.deposit_day_count, DayCountConvention::Act360);
        assert_eq!(config.swap_day_count, DayCountConvention::Thirty360E);
        assert_eq!(config.swap_frequency, 1);
    }

    #[test]
    fn test_partial_toml() {
        let config = BootstrapConfig::from_toml_str(
            r#"
            deposit_day_count = "ACT/365"
            swap_frequency = 2

            [solver]
            max_iterations = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.deposit_day_count, DayCountConvention::Act365Fixed);
        assert_eq!(config.future_day_count, DayCountConvention::Act360);
        assert_eq!(config.swap_frequency, 2);
        assert_eq!(config.solver.max_iterations, 25);
        assert_eq!(config.solver.tolerance, 1e-12);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(BootstrapConfig::from_toml_str("swap_frequency = 0").is_err());
        assert!(BootstrapConfig::from_toml_str("deposit_day_count = \"BUS/252\"").is_err());
        assert!(BootstrapConfig::from_toml_str("[solver]\ntolerance = -1.0").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = BootstrapConfig::from_file("/nonexistent/ratekit.toml").unwrap_err();
        assert!(matches!(err, CurveError::Config { .. }));
    }
}
