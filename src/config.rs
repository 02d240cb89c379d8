//! Configuration for the sigma-algebra closure engine.
//!
//! Closure over `n` outcomes can produce up to `2^n` events, but the result
//! is usually far smaller: it has `2^k` events for the `k` atoms the
//! generators carve out. The event budget is therefore the guard that
//! bounds memory; a universe-size cap is available for callers who want to
//! refuse large inputs outright.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpaceError};

/// Size guards for [`SigmaAlgebra::generate_with`](crate::SigmaAlgebra::generate_with).
///
/// # Examples
///
/// ```
/// use u_probspace::ClosureConfig;
///
/// let config = ClosureConfig::default();
/// assert_eq!(config.max_outcomes, None);
/// assert!(config.validate().is_ok());
///
/// let config = ClosureConfig::from_toml("max_outcomes = 4\nmax_events = 16\n").unwrap();
/// assert_eq!(config.max_outcomes, Some(4));
/// assert_eq!(config.max_events, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureConfig {
    /// Largest universe the closure will accept, `None` for no limit.
    /// Default: `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_outcomes: Option<usize>,

    /// Largest number of distinct events the closure may hold at any pass.
    /// Default: 4096, the power set of 12 outcomes
    pub max_events: usize,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            max_outcomes: None,
            max_events: 1 << 12,
        }
    }
}

impl ClosureConfig {
    /// Tight preset for interactive use.
    pub fn strict() -> Self {
        Self {
            max_outcomes: Some(8),
            max_events: 1 << 8,
        }
    }

    /// Loose preset for offline batch runs.
    pub fn permissive() -> Self {
        Self {
            max_outcomes: None,
            max_events: 1 << 16,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        // Every closure over a non-empty universe holds the empty and the
        // full event.
        if self.max_events < 2 {
            return Err(SpaceError::InvalidConfig(format!(
                "max_events must be at least 2, got {}",
                self.max_events
            )));
        }
        Ok(())
    }

    /// Loads configuration from a TOML string and validates it.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| SpaceError::InvalidConfig(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SpaceError::InvalidConfig(format!("failed to serialize TOML: {e}")))
    }
}
