//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `WINGMATE` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use wingmate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Rewarm after {}h", config.strategy.decisions.rewarm_after_hours);
//! ```

mod error;
mod strategy;

pub use error::{ConfigError, ValidationError};
pub use strategy::{
    DecisionThresholds, FreshnessPolicy, FreshnessTier, InterestWeights, KeywordLists,
    MessageLengthLimits, ScoreBounds, StageThresholds, StrategyConfig,
};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Wingmate strategy core.
/// Load using [`AppConfig::load()`] which reads from environment
/// variables, optionally pulling the strategy policy from a YAML file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Strategy engine policy (weights, thresholds, keyword lists)
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Optional path to a YAML policy file overriding `strategy`
    #[serde(default)]
    pub policy_file: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `WINGMATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Replaces the strategy section with the contents of
    ///    `policy_file` when one is configured
    ///
    /// Every field has a default, so a zero-configuration load succeeds
    /// with the stock policy.
    ///
    /// # Environment Variable Format
    ///
    /// - `WINGMATE__STRATEGY__BOUNDS__INITIAL=40` -> `strategy.bounds.initial = 40`
    /// - `WINGMATE__POLICY_FILE=policy.yaml` -> `policy_file = Some("policy.yaml")`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if environment values cannot be parsed into
    /// the expected types, or if the policy file is missing or malformed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WINGMATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if let Some(path) = &config.policy_file {
            config.strategy = StrategyConfig::from_yaml_file(path)?;
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any policy value is semantically
    /// invalid (inverted bounds, unsorted tiers, broken patterns).
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.strategy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.policy_file.is_none());
    }

    #[test]
    fn config_deserializes_from_json_fragment() {
        let json = r#"{
            "strategy": {
                "decisions": { "rewarm_after_hours": 24.0 }
            }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.strategy.decisions.rewarm_after_hours, 24.0);
        // Untouched sections keep their defaults.
        assert_eq!(config.strategy.bounds.initial, 50.0);
    }
}
