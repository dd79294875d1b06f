//! Message feature extraction.
//!
//! Pure, total functions over the message text: any string, including the
//! empty one, yields a valid feature set. All language heuristics are
//! keyword/pattern driven and come from configuration, so behavior is
//! reproducible without a live model.

use regex::Regex;

use crate::config::{StrategyConfig, ValidationError};

use super::features::{CounterpartFeatures, UserFeatures};

/// Extracts role-specific features from a single message.
#[derive(Debug, Clone)]
pub struct MessageAnalyzer {
    short_word_limit: usize,
    long_word_limit: usize,
    emoji: Regex,
    personal_disclosure: Vec<String>,
    future_projection: Vec<String>,
    telegram_invite: Vec<String>,
    date_invite: Vec<String>,
}

impl MessageAnalyzer {
    /// Builds an analyzer from the policy, compiling the emoji pattern
    /// once. Keyword lists are lowercased here so each message is only
    /// lowercased once at analysis time.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmojiPattern` if the configured
    /// pattern does not compile. `StrategyConfig::validate` reports the
    /// same error at load time, so a validated config cannot fail here.
    pub fn new(config: &StrategyConfig) -> Result<Self, ValidationError> {
        let emoji = Regex::new(&config.keywords.emoji_pattern)
            .map_err(|e| ValidationError::InvalidEmojiPattern(e.to_string()))?;

        let lowercase_all =
            |list: &[String]| list.iter().map(|k| k.to_lowercase()).collect::<Vec<_>>();

        Ok(Self {
            short_word_limit: config.lengths.short_word_limit,
            long_word_limit: config.lengths.long_word_limit,
            emoji,
            personal_disclosure: lowercase_all(&config.keywords.personal_disclosure),
            future_projection: lowercase_all(&config.keywords.future_projection),
            telegram_invite: lowercase_all(&config.keywords.telegram_invite),
            date_invite: lowercase_all(&config.keywords.date_invite),
        })
    }

    /// Extracts features from a counterpart message.
    pub fn analyze_counterpart(&self, text: &str) -> CounterpartFeatures {
        let word_count = text.split_whitespace().count();
        let lower = text.to_lowercase();

        CounterpartFeatures {
            word_count,
            has_question: text.contains('?'),
            has_emoji: self.emoji.is_match(text),
            is_short: word_count <= self.short_word_limit,
            is_long: word_count > self.long_word_limit,
            has_personal_disclosure: contains_any(&lower, &self.personal_disclosure),
        }
    }

    /// Extracts features from a user message.
    ///
    /// The detectors are independent; a single message may set any
    /// combination of flags.
    pub fn analyze_user(&self, text: &str) -> UserFeatures {
        let lower = text.to_lowercase();

        UserFeatures {
            has_question: text.contains('?'),
            has_future_projection: contains_any(&lower, &self.future_projection),
            has_telegram_invite: contains_any(&lower, &self.telegram_invite),
            has_date_invite: contains_any(&lower, &self.date_invite),
        }
    }
}

fn contains_any(lowered_text: &str, lowered_keywords: &[String]) -> bool {
    lowered_keywords.iter().any(|k| lowered_text.contains(k.as_str()))
}
