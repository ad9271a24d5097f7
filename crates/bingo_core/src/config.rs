//! Runtime configuration for the bingo core.
//!
//! # Responsibility
//! - Hold the grid sizing policy and due-soon threshold.
//! - Apply environment overrides on top of defaults.
//!
//! # Invariants
//! - Blank environment values are ignored.
//! - Malformed values are rejected, never silently replaced by defaults.

use crate::model::grid::GridSizePolicy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default due-soon window: one hour.
pub const DEFAULT_DUE_SOON_THRESHOLD_MS: i64 = 3_600_000;

pub const ENV_GRID_POLICY: &str = "BINGO_GRID_POLICY";
pub const ENV_DUE_SOON_THRESHOLD_MS: &str = "BINGO_DUE_SOON_THRESHOLD_MS";

/// Configuration parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPolicy(String),
    InvalidThreshold(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy(value) => write!(
                f,
                "unsupported grid policy `{value}`; expected fixed3x3|adaptive"
            ),
            Self::InvalidThreshold(value) => write!(
                f,
                "due-soon threshold must be a non-negative integer of milliseconds, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Core configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BingoConfig {
    pub grid_policy: GridSizePolicy,
    pub due_soon_threshold_ms: i64,
}

impl Default for BingoConfig {
    fn default() -> Self {
        Self {
            grid_policy: GridSizePolicy::Adaptive,
            due_soon_threshold_ms: DEFAULT_DUE_SOON_THRESHOLD_MS,
        }
    }
}

impl BingoConfig {
    /// Loads defaults overridden by `BINGO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads defaults overridden by values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(ENV_GRID_POLICY)) {
            config.grid_policy = parse_grid_policy(&raw)?;
        }
        if let Some(raw) = non_blank(lookup(ENV_DUE_SOON_THRESHOLD_MS)) {
            config.due_soon_threshold_ms = parse_threshold(&raw)?;
        }

        Ok(config)
    }
}

/// Parses a grid policy id (case-insensitive).
pub fn parse_grid_policy(value: &str) -> Result<GridSizePolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "fixed3x3" | "fixed" => Ok(GridSizePolicy::Fixed3x3),
        "adaptive" => Ok(GridSizePolicy::Adaptive),
        other => Err(ConfigError::InvalidPolicy(other.to_string())),
    }
}

fn parse_threshold(value: &str) -> Result<i64, ConfigError> {
    let trimmed = value.trim();
    match trimmed.parse::<i64>() {
        Ok(ms) if ms >= 0 => Ok(ms),
        _ => Err(ConfigError::InvalidThreshold(trimmed.to_string())),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        parse_grid_policy, BingoConfig, ConfigError, ENV_DUE_SOON_THRESHOLD_MS, ENV_GRID_POLICY,
    };
    use crate::model::grid::GridSizePolicy;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_adaptive_and_one_hour() {
        let config = BingoConfig::from_lookup(|_| None).expect("defaults");
        assert_eq!(config, BingoConfig::default());
        assert_eq!(config.grid_policy, GridSizePolicy::Adaptive);
        assert_eq!(config.due_soon_threshold_ms, 3_600_000);
    }

    #[test]
    fn env_overrides_apply_and_blanks_are_ignored() {
        let config = BingoConfig::from_lookup(lookup_from(&[
            (ENV_GRID_POLICY, " Fixed3x3 "),
            (ENV_DUE_SOON_THRESHOLD_MS, "   "),
        ]))
        .expect("valid overrides");
        assert_eq!(config.grid_policy, GridSizePolicy::Fixed3x3);
        assert_eq!(config.due_soon_threshold_ms, 3_600_000);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = BingoConfig::from_lookup(lookup_from(&[(ENV_DUE_SOON_THRESHOLD_MS, "-5")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidThreshold("-5".to_string()));

        let err = parse_grid_policy("hexagonal").unwrap_err();
        assert!(err.to_string().contains("fixed3x3|adaptive"));
    }

    #[test]
    fn deserializes_partial_config_with_defaults() {
        let config: BingoConfig =
            serde_json::from_str(r#"{"grid_policy":"fixed3x3"}"#).expect("valid json");
        assert_eq!(config.grid_policy, GridSizePolicy::Fixed3x3);
        assert_eq!(config.due_soon_threshold_ms, 3_600_000);
    }
}
