//! Dialogue stage and its progression rules.

use serde::{Deserialize, Serialize};

use crate::config::StageThresholds;
use crate::domain::foundation::ValidationError;

use super::state::DialogueState;

/// How far a dialogue has progressed toward an in-person meeting.
///
/// Stages are ordinal and only ever move forward. There is no terminal
/// stage: `DatePlanning` persists for the rest of the dialogue and the
/// engine remains callable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStage {
    /// First contact; icebreakers and opening lines.
    Opening,

    /// Enough exchange to build rapport on the dating app.
    Rapport,

    /// Interest is high enough to push the move to Telegram.
    TelegramInvite,

    /// The counterpart confirmed they moved to Telegram.
    OnTelegram,

    /// A shared future has been projected; steer toward a date.
    DatePlanning,
}

impl DialogueStage {
    /// Returns the 1-based ordinal of the stage.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Opening => 1,
            Self::Rapport => 2,
            Self::TelegramInvite => 3,
            Self::OnTelegram => 4,
            Self::DatePlanning => 5,
        }
    }

    /// Builds a stage from its 1-based ordinal, as stored by the
    /// persistence layer.
    pub fn try_from_ordinal(ordinal: u8) -> Result<Self, ValidationError> {
        match ordinal {
            1 => Ok(Self::Opening),
            2 => Ok(Self::Rapport),
            3 => Ok(Self::TelegramInvite),
            4 => Ok(Self::OnTelegram),
            5 => Ok(Self::DatePlanning),
            other => Err(ValidationError::out_of_range(
                "stage",
                1.0,
                5.0,
                f64::from(other),
            )),
        }
    }

    /// Returns a short label, suitable for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Opening => "Opening",
            Self::Rapport => "Rapport",
            Self::TelegramInvite => "Telegram invite",
            Self::OnTelegram => "On Telegram",
            Self::DatePlanning => "Date planning",
        }
    }
}

impl Default for DialogueStage {
    fn default() -> Self {
        Self::Opening
    }
}

/// Stage progression rules.
///
/// The rules are an ordered list of guards applied against a single
/// accumulator. Later rules see the stage value already bumped by earlier
/// ones, and rules three and four are not conditioned on the earlier
/// rules having fired, so a single call can jump several stages at once
/// (e.g. straight to `OnTelegram` on a stage-one dialogue whose
/// counterpart already confirmed Telegram). That jump is intended policy.
#[derive(Debug, Clone)]
pub struct StageMachine {
    thresholds: StageThresholds,
}

impl StageMachine {
    /// Creates a stage machine with the given thresholds.
    pub fn new(thresholds: StageThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns the stage after applying the progression rules.
    ///
    /// The result is never below `state.stage`.
    pub fn advanced(&self, state: &DialogueState, effective_interest: f64) -> DialogueStage {
        let t = &self.thresholds;
        let mut stage = state.stage;

        if stage < DialogueStage::Rapport
            && state.message_count_total >= t.min_messages_for_rapport
        {
            stage = DialogueStage::Rapport;
        }

        if stage == DialogueStage::Rapport
            && effective_interest >= t.telegram_invite_interest
            && !state.is_on_telegram
            && state.message_count_total >= t.min_messages_for_telegram_invite
        {
            stage = DialogueStage::TelegramInvite;
        }

        if state.is_on_telegram && stage < DialogueStage::OnTelegram {
            stage = DialogueStage::OnTelegram;
        }

        if state.has_future_projection && stage < DialogueStage::DatePlanning {
            stage = DialogueStage::DatePlanning;
        }

        stage
    }
}
