//! Strategy policy configuration.
//!
//! Every tunable of the strategy engine lives here: interest weights,
//! score bounds, freshness decay tiers, stage thresholds, decision
//! thresholds, and the keyword lists behind the message heuristics.
//! The structure is immutable after loading; alternate policies are
//! swapped in as data (env overrides or a YAML policy file), never as
//! code changes.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use super::error::{ConfigError, ValidationError};

/// Root policy for the strategy engine.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct StrategyConfig {
    /// Per-feature deltas applied to the base interest score.
    #[serde(default)]
    pub weights: InterestWeights,

    /// Bounds and starting point of the interest score.
    #[serde(default)]
    pub bounds: ScoreBounds,

    /// Word-count limits classifying messages as short or long.
    #[serde(default)]
    pub lengths: MessageLengthLimits,

    /// Time-decay tiers applied to base interest after silence.
    #[serde(default)]
    pub freshness: FreshnessPolicy,

    /// Counters and scores gating stage progression.
    #[serde(default)]
    pub stages: StageThresholds,

    /// Scores and counters gating the next-objective decision.
    #[serde(default)]
    pub decisions: DecisionThresholds,

    /// Keyword lists behind the substring heuristics.
    #[serde(default)]
    pub keywords: KeywordLists,
}

impl StrategyConfig {
    /// Loads a policy from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    /// Semantic validation is a separate step; call [`validate`] on the
    /// result.
    ///
    /// [`validate`]: StrategyConfig::validate
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    /// Validates the policy semantically.
    ///
    /// The engine itself never validates configuration at call time, so
    /// this must run once at load. Checks:
    /// - score bounds are ordered and contain the initial score
    /// - short/long word limits are ordered
    /// - freshness tiers are sorted strictly ascending with sane multipliers
    /// - the emoji pattern compiles
    /// - keyword lists contain no blank entries
    /// - decision thresholds lie within the score bounds
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bounds.min >= self.bounds.max {
            return Err(ValidationError::ScoreBoundsInverted);
        }
        if self.bounds.initial < self.bounds.min || self.bounds.initial > self.bounds.max {
            return Err(ValidationError::InitialScoreOutOfBounds);
        }

        if self.lengths.short_word_limit >= self.lengths.long_word_limit {
            return Err(ValidationError::LengthLimitsInverted);
        }

        let mut previous_bound: Option<f64> = None;
        for tier in &self.freshness.tiers {
            if !tier.multiplier.is_finite() || tier.multiplier < 0.0 {
                return Err(ValidationError::InvalidFreshnessMultiplier);
            }
            if let Some(prev) = previous_bound {
                if tier.within_hours <= prev {
                    return Err(ValidationError::UnsortedFreshnessTiers);
                }
            }
            previous_bound = Some(tier.within_hours);
        }
        if !self.freshness.floor_multiplier.is_finite() || self.freshness.floor_multiplier < 0.0 {
            return Err(ValidationError::InvalidFreshnessMultiplier);
        }

        Regex::new(&self.keywords.emoji_pattern)
            .map_err(|e| ValidationError::InvalidEmojiPattern(e.to_string()))?;

        self.keywords.check_no_blank_entries()?;

        let in_bounds = |value: f64| value >= self.bounds.min && value <= self.bounds.max;
        if !in_bounds(self.stages.telegram_invite_interest) {
            return Err(ValidationError::ThresholdOutOfBounds("telegram_invite_interest"));
        }
        if !in_bounds(self.decisions.date_invite_interest) {
            return Err(ValidationError::ThresholdOutOfBounds("date_invite_interest"));
        }
        if !in_bounds(self.decisions.low_interest) {
            return Err(ValidationError::ThresholdOutOfBounds("low_interest"));
        }

        if self.decisions.rewarm_after_hours <= 0.0 {
            return Err(ValidationError::NonPositiveRewarmWindow);
        }

        Ok(())
    }
}

/// Interest score delta per detected counterpart-message feature.
///
/// The short-message weight is a penalty and is negative by default.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InterestWeights {
    #[serde(default = "default_question_weight")]
    pub question: f64,

    #[serde(default = "default_emoji_weight")]
    pub emoji: f64,

    #[serde(default = "default_long_message_weight")]
    pub long_message: f64,

    #[serde(default = "default_personal_disclosure_weight")]
    pub personal_disclosure: f64,

    #[serde(default = "default_short_message_weight")]
    pub short_message: f64,
}

impl Default for InterestWeights {
    fn default() -> Self {
        Self {
            question: default_question_weight(),
            emoji: default_emoji_weight(),
            long_message: default_long_message_weight(),
            personal_disclosure: default_personal_disclosure_weight(),
            short_message: default_short_message_weight(),
        }
    }
}

fn default_question_weight() -> f64 {
    5.0
}

fn default_emoji_weight() -> f64 {
    3.0
}

fn default_long_message_weight() -> f64 {
    4.0
}

fn default_personal_disclosure_weight() -> f64 {
    6.0
}

fn default_short_message_weight() -> f64 {
    -3.0
}

/// Clamping bounds and starting value of the base interest score.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ScoreBounds {
    #[serde(default = "default_min_score")]
    pub min: f64,

    #[serde(default = "default_max_score")]
    pub max: f64,

    /// Score assigned when a dialogue is opened.
    #[serde(default = "default_initial_score")]
    pub initial: f64,
}

impl ScoreBounds {
    /// Clamps a raw score into the configured range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self {
            min: default_min_score(),
            max: default_max_score(),
            initial: default_initial_score(),
        }
    }
}

fn default_min_score() -> f64 {
    0.0
}

fn default_max_score() -> f64 {
    100.0
}

fn default_initial_score() -> f64 {
    50.0
}

/// Word-count boundaries for the short/long message classification.
///
/// A message is short iff `word_count <= short_word_limit` and long iff
/// `word_count > long_word_limit`; in between it is neither.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct MessageLengthLimits {
    #[serde(default = "default_short_word_limit")]
    pub short_word_limit: usize,

    #[serde(default = "default_long_word_limit")]
    pub long_word_limit: usize,
}

impl Default for MessageLengthLimits {
    fn default() -> Self {
        Self {
            short_word_limit: default_short_word_limit(),
            long_word_limit: default_long_word_limit(),
        }
    }
}

fn default_short_word_limit() -> usize {
    2
}

fn default_long_word_limit() -> usize {
    25
}

/// One freshness decay tier: silences shorter than `within_hours` keep
/// the given multiplier.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct FreshnessTier {
    pub within_hours: f64,
    pub multiplier: f64,
}

/// Ordered decay tiers plus the floor applied beyond the last tier.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FreshnessPolicy {
    /// Tiers sorted ascending by `within_hours`.
    #[serde(default = "default_freshness_tiers")]
    pub tiers: Vec<FreshnessTier>,

    /// Multiplier once the silence exceeds every tier bound.
    #[serde(default = "default_floor_multiplier")]
    pub floor_multiplier: f64,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            tiers: default_freshness_tiers(),
            floor_multiplier: default_floor_multiplier(),
        }
    }
}

fn default_freshness_tiers() -> Vec<FreshnessTier> {
    vec![
        FreshnessTier {
            within_hours: 24.0,
            multiplier: 1.0,
        },
        FreshnessTier {
            within_hours: 72.0,
            multiplier: 0.7,
        },
        FreshnessTier {
            within_hours: 168.0,
            multiplier: 0.5,
        },
    ]
}

fn default_floor_multiplier() -> f64 {
    0.3
}

/// Counter and score thresholds gating stage progression.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct StageThresholds {
    /// Total messages before the dialogue counts as past the opening.
    #[serde(default = "default_min_messages_for_rapport")]
    pub min_messages_for_rapport: u32,

    /// Effective interest required before pushing for Telegram.
    #[serde(default = "default_telegram_invite_interest")]
    pub telegram_invite_interest: f64,

    /// Total messages required before pushing for Telegram.
    #[serde(default = "default_min_messages_for_telegram_invite")]
    pub min_messages_for_telegram_invite: u32,
}

impl Default for StageThresholds {
    fn default() -> Self {
        Self {
            min_messages_for_rapport: default_min_messages_for_rapport(),
            telegram_invite_interest: default_telegram_invite_interest(),
            min_messages_for_telegram_invite: default_min_messages_for_telegram_invite(),
        }
    }
}

fn default_min_messages_for_rapport() -> u32 {
    6
}

fn default_telegram_invite_interest() -> f64 {
    70.0
}

fn default_min_messages_for_telegram_invite() -> u32 {
    10
}

/// Score and counter thresholds gating the next-objective decision.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct DecisionThresholds {
    /// Effective interest required before proposing a date.
    #[serde(default = "default_date_invite_interest")]
    pub date_invite_interest: f64,

    /// Telegram messages required before proposing a date.
    #[serde(default = "default_min_telegram_messages_for_date")]
    pub min_telegram_messages_for_date: u32,

    /// Effective interest at or below which the dialogue needs salvage.
    #[serde(default = "default_low_interest")]
    pub low_interest: f64,

    /// Hours of silence after which the objective becomes rewarm.
    #[serde(default = "default_rewarm_after_hours")]
    pub rewarm_after_hours: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            date_invite_interest: default_date_invite_interest(),
            min_telegram_messages_for_date: default_min_telegram_messages_for_date(),
            low_interest: default_low_interest(),
            rewarm_after_hours: default_rewarm_after_hours(),
        }
    }
}

fn default_date_invite_interest() -> f64 {
    75.0
}

fn default_min_telegram_messages_for_date() -> u32 {
    15
}

fn default_low_interest() -> f64 {
    30.0
}

fn default_rewarm_after_hours() -> f64 {
    48.0
}

/// Keyword lists and patterns behind the message heuristics.
///
/// Matching is case-insensitive substring containment. Defaults cover
/// English and Russian since those are the languages the copilot ships
/// with; deployments localize by swapping the lists.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KeywordLists {
    /// Counterpart phrases that signal personal disclosure.
    #[serde(default = "default_personal_disclosure_keywords")]
    pub personal_disclosure: Vec<String>,

    /// User phrases that project a shared future.
    #[serde(default = "default_future_projection_keywords")]
    pub future_projection: Vec<String>,

    /// User phrases that invite the counterpart to Telegram.
    #[serde(default = "default_telegram_invite_keywords")]
    pub telegram_invite: Vec<String>,

    /// User phrases that propose meeting in person.
    #[serde(default = "default_date_invite_keywords")]
    pub date_invite: Vec<String>,

    /// Regex character class matching emoji.
    #[serde(default = "default_emoji_pattern")]
    pub emoji_pattern: String,
}

impl KeywordLists {
    pub(super) fn check_no_blank_entries(&self) -> Result<(), ValidationError> {
        let lists: [(&'static str, &[String]); 4] = [
            ("personal_disclosure", &self.personal_disclosure),
            ("future_projection", &self.future_projection),
            ("telegram_invite", &self.telegram_invite),
            ("date_invite", &self.date_invite),
        ];
        for (name, list) in lists {
            if list.iter().any(|k| k.trim().is_empty()) {
                return Err(ValidationError::BlankKeyword(name));
            }
        }
        Ok(())
    }
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self {
            personal_disclosure: default_personal_disclosure_keywords(),
            future_projection: default_future_projection_keywords(),
            telegram_invite: default_telegram_invite_keywords(),
            date_invite: default_date_invite_keywords(),
            emoji_pattern: default_emoji_pattern(),
        }
    }
}

fn default_personal_disclosure_keywords() -> Vec<String> {
    [
        "i feel", "my family", "my job", "my dream", "my ex", "to be honest",
        "я чувствую", "моя семья", "моя работа", "моя мечта", "если честно",
        "мне нравится",
    ]
    .map(String::from)
    .to_vec()
}

fn default_future_projection_keywords() -> Vec<String> {
    [
        "we could", "we should", "next time", "one day we", "together",
        "давай как-нибудь", "в следующий раз", "когда-нибудь вместе", "вместе",
    ]
    .map(String::from)
    .to_vec()
}

fn default_telegram_invite_keywords() -> Vec<String> {
    [
        "telegram", "tg", "телеграм", "тг", "@",
    ]
    .map(String::from)
    .to_vec()
}

fn default_date_invite_keywords() -> Vec<String> {
    [
        "meet up", "grab a coffee", "grab a drink", "date",
        "встретиться", "встретимся", "кофе", "свидание", "увидимся",
    ]
    .map(String::from)
    .to_vec()
}

fn default_emoji_pattern() -> String {
    r"[\p{Emoji_Presentation}\p{Extended_Pictographic}]".to_string()
}
