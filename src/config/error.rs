//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Could not read policy file: {0}")]
    PolicyFileRead(#[from] std::io::Error),

    #[error("Could not parse policy file: {0}")]
    PolicyFileParse(#[from] serde_yaml::Error),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("Score bounds inverted: min must be strictly below max")]
    ScoreBoundsInverted,

    #[error("Initial score must lie within the score bounds")]
    InitialScoreOutOfBounds,

    #[error("Short message word limit must be strictly below long message word limit")]
    LengthLimitsInverted,

    #[error("Freshness tiers must be sorted strictly ascending by hour bound")]
    UnsortedFreshnessTiers,

    #[error("Freshness multiplier must be a finite non-negative number")]
    InvalidFreshnessMultiplier,

    #[error("Invalid emoji pattern: {0}")]
    InvalidEmojiPattern(String),

    #[error("Keyword list '{0}' contains a blank entry")]
    BlankKeyword(&'static str),

    #[error("Threshold '{0}' lies outside the score bounds")]
    ThresholdOutOfBounds(&'static str),

    #[error("Rewarm window must be a positive number of hours")]
    NonPositiveRewarmWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_display_the_offending_field() {
        let err = ValidationError::ThresholdOutOfBounds("low_interest");
        assert!(err.to_string().contains("low_interest"));

        let err = ValidationError::BlankKeyword("date_invite");
        assert!(err.to_string().contains("date_invite"));
    }
}
