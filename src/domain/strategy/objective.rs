//! Next-objective policy.
//!
//! Maps the current stage, effective interest, and dialogue counters to
//! the single action the copilot should pursue in its next drafted
//! message.

use serde::{Deserialize, Serialize};

use crate::config::DecisionThresholds;
use crate::domain::foundation::Timestamp;

use super::stage::DialogueStage;
use super::state::DialogueState;

/// The next recommended conversational action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Long silence; restart the conversation from a fresh angle.
    Rewarm,

    /// Push the move from the dating app to Telegram.
    TelegramInvite,

    /// Propose meeting in person.
    DateInvite,

    /// Interest is critically low; recover before anything else.
    Salvage,

    /// Nothing special; keep the conversation going.
    Continue,
}

impl Objective {
    /// Returns the drafting directive handed to the message generator.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Rewarm => {
                "Re-open after a long silence. Reference earlier context, keep it light, no pressure."
            }
            Self::TelegramInvite => {
                "Steer toward continuing on Telegram. Offer the handle casually, once."
            }
            Self::DateInvite => {
                "Propose meeting in person. Suggest a concrete, low-stakes plan."
            }
            Self::Salvage => {
                "Interest is fading. Change topic, ask something engaging, avoid neediness."
            }
            Self::Continue => {
                "Keep the conversation flowing. Match their energy and build on the last message."
            }
        }
    }

    /// Returns a shorter label for the objective, suitable for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rewarm => "Rewarm",
            Self::TelegramInvite => "Telegram invite",
            Self::DateInvite => "Date invite",
            Self::Salvage => "Salvage",
            Self::Continue => "Continue",
        }
    }
}

/// Decides the next objective, first matching rule wins.
#[derive(Debug, Clone)]
pub struct ObjectivePolicy {
    thresholds: DecisionThresholds,
}

impl ObjectivePolicy {
    /// Creates a policy with the given decision thresholds.
    pub fn new(thresholds: DecisionThresholds) -> Self {
        Self { thresholds }
    }

    /// Picks the next objective.
    ///
    /// Priority order:
    /// 1. silence longer than the rewarm window, regardless of stage
    /// 2. the Telegram-invite stage pushes its invite
    /// 3. on Telegram with high interest and enough exchange, propose a date
    /// 4. critically low interest needs salvage
    /// 5. otherwise continue
    pub fn decide(
        &self,
        stage: DialogueStage,
        effective_interest: f64,
        state: &DialogueState,
        now: &Timestamp,
    ) -> Objective {
        let t = &self.thresholds;

        if let Some(last) = &state.last_message_at {
            if now.hours_since(last) > t.rewarm_after_hours {
                return Objective::Rewarm;
            }
        }

        if stage == DialogueStage::TelegramInvite {
            return Objective::TelegramInvite;
        }

        if stage >= DialogueStage::OnTelegram
            && effective_interest >= t.date_invite_interest
            && state.telegram_message_count >= t.min_telegram_messages_for_date
        {
            return Objective::DateInvite;
        }

        if effective_interest <= t.low_interest {
            return Objective::Salvage;
        }

        Objective::Continue
    }
}
