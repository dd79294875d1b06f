//! Dialogue state snapshot.
//!
//! The engine receives a snapshot, returns a new one, and never retains a
//! reference; ownership of the durable row stays with the persistence
//! layer. Sticky flags and counters carry explicit monotonic semantics
//! (`note_*` methods only ever move them forward) instead of relying on
//! call-site discipline.

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::domain::foundation::Timestamp;

use super::stage::DialogueStage;

/// Where a message was exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// The dating app the dialogue started on.
    DatingApp,
    /// Telegram, once the counterpart has moved over.
    Telegram,
}

/// Snapshot of one dialogue's strategy state.
///
/// Every field that is absent when deserializing an older row falls back
/// to its documented default, so partially-populated snapshots are never
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueState {
    /// Current progression stage; monotonically non-decreasing.
    #[serde(default)]
    pub stage: DialogueStage,

    /// Cumulative interest score before time decay.
    #[serde(default = "default_base_interest")]
    pub base_interest: f64,

    /// Last computed freshness decay factor.
    #[serde(default = "default_freshness_multiplier")]
    pub freshness_multiplier: f64,

    /// `base_interest * freshness_multiplier`, rounded to two decimals.
    /// Always recomputed alongside its inputs, never updated on its own.
    #[serde(default = "default_base_interest")]
    pub effective_interest: f64,

    /// The user has projected a shared future in this dialogue. Sticky.
    #[serde(default)]
    pub has_future_projection: bool,

    /// Times the user invited the counterpart to Telegram. Never decreases.
    #[serde(default)]
    pub telegram_invite_attempts: u32,

    /// Times the user proposed a date. Never decreases.
    #[serde(default)]
    pub date_invite_attempts: u32,

    /// The counterpart confirmed moving to Telegram. Set by an external
    /// confirmation event; the engine only reads it.
    #[serde(default)]
    pub is_on_telegram: bool,

    /// Messages exchanged in the whole dialogue. Maintained by the caller.
    #[serde(default)]
    pub message_count_total: u32,

    /// Messages exchanged on Telegram. Maintained by the caller.
    #[serde(default)]
    pub telegram_message_count: u32,

    /// When the previous message was exchanged; `None` for a fresh
    /// dialogue.
    #[serde(default)]
    pub last_message_at: Option<Timestamp>,
}

fn default_base_interest() -> f64 {
    50.0
}

fn default_freshness_multiplier() -> f64 {
    1.0
}

impl Default for DialogueState {
    fn default() -> Self {
        Self {
            stage: DialogueStage::Opening,
            base_interest: default_base_interest(),
            freshness_multiplier: default_freshness_multiplier(),
            effective_interest: default_base_interest(),
            has_future_projection: false,
            telegram_invite_attempts: 0,
            date_invite_attempts: 0,
            is_on_telegram: false,
            message_count_total: 0,
            telegram_message_count: 0,
            last_message_at: None,
        }
    }
}

impl DialogueState {
    /// Builds the snapshot for a dialogue that has just begun, using the
    /// configured initial score.
    pub fn opened(config: &StrategyConfig) -> Self {
        Self {
            base_interest: config.bounds.initial,
            effective_interest: config.bounds.initial,
            ..Self::default()
        }
    }

    /// Records one exchanged message on the given channel.
    pub fn note_message(&mut self, channel: Channel) {
        self.message_count_total += 1;
        if channel == Channel::Telegram {
            self.telegram_message_count += 1;
        }
    }

    /// Stamps the time of the latest exchanged message.
    pub fn touch(&mut self, at: Timestamp) {
        self.last_message_at = Some(at);
    }

    /// Marks that a shared future has been projected. Monotonic: once
    /// true, stays true.
    pub fn note_future_projection(&mut self) {
        self.has_future_projection = true;
    }

    /// Counts one Telegram invite attempt by the user.
    pub fn note_telegram_invite_attempt(&mut self) {
        self.telegram_invite_attempts += 1;
    }

    /// Counts one date proposal by the user.
    pub fn note_date_invite_attempt(&mut self) {
        self.date_invite_attempts += 1;
    }

    /// Records the external confirmation that the counterpart is on
    /// Telegram. Monotonic: once true, stays true.
    pub fn confirm_telegram(&mut self) {
        self.is_on_telegram = true;
    }
}
