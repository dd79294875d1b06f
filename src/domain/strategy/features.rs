//! Message features extracted by the analyzer.
//!
//! Features are split by conversational role: counterpart messages feed
//! the interest score, user messages feed the sticky intent flags and
//! invite-attempt counters. The two sets share nothing, so they are
//! separate types rather than one struct with dead fields.

use serde::{Deserialize, Serialize};

/// Who authored an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderRole {
    /// The person our user is talking to.
    Counterpart,
    /// The copilot user (message composed on their side).
    User,
}

/// Features extracted from a counterpart message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartFeatures {
    /// Non-empty whitespace-separated tokens.
    pub word_count: usize,
    /// Message contains a question mark.
    pub has_question: bool,
    /// Message matches the configured emoji pattern.
    pub has_emoji: bool,
    /// Word count at or below the short-message limit.
    pub is_short: bool,
    /// Word count above the long-message limit.
    pub is_long: bool,
    /// Message contains a personal-disclosure keyword.
    pub has_personal_disclosure: bool,
}

/// Features extracted from a user message.
///
/// The flags are independent detectors; one message can set several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFeatures {
    /// Message contains a question mark.
    pub has_question: bool,
    /// Message projects a shared future with the counterpart.
    pub has_future_projection: bool,
    /// Message invites the counterpart to Telegram.
    pub has_telegram_invite: bool,
    /// Message proposes meeting in person.
    pub has_date_invite: bool,
}
