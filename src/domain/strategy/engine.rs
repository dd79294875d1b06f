//! Strategy engine orchestrator.
//!
//! One pure transition: `(state, message, role, now) -> (new state,
//! objective)`. The engine performs no I/O, samples no clock of its own,
//! and never mutates its input snapshot, so it is deterministic for a
//! given `now` and safe to call from any number of workers as long as
//! each invocation owns its snapshot.

use crate::config::{StrategyConfig, ValidationError};
use crate::domain::foundation::Timestamp;

use super::analyzer::MessageAnalyzer;
use super::features::SenderRole;
use super::freshness::FreshnessDecay;
use super::interest::InterestModel;
use super::objective::{Objective, ObjectivePolicy};
use super::stage::StageMachine;
use super::state::DialogueState;

/// Result of one strategy transition.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    /// The updated snapshot to persist.
    pub state: DialogueState,
    /// What the next drafted message should try to accomplish.
    pub objective: Objective,
}

/// The conversation-progression strategy engine.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    analyzer: MessageAnalyzer,
    interest: InterestModel,
    freshness: FreshnessDecay,
    stages: StageMachine,
    policy: ObjectivePolicy,
}

impl StrategyEngine {
    /// Assembles the engine from a policy.
    ///
    /// # Errors
    ///
    /// Fails only on an emoji pattern that does not compile, which
    /// [`StrategyConfig::validate`] already reports at load time.
    pub fn new(config: &StrategyConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            analyzer: MessageAnalyzer::new(config)?,
            interest: InterestModel::new(config.weights.clone(), config.bounds),
            freshness: FreshnessDecay::new(config.freshness.clone()),
            stages: StageMachine::new(config.stages),
            policy: ObjectivePolicy::new(config.decisions),
        })
    }

    /// Runs one strategy transition for an inbound message.
    ///
    /// Counterpart messages update the interest score and re-apply
    /// freshness decay against the silence that preceded this message.
    /// User messages update the sticky intent flags and invite-attempt
    /// counters. Both paths then re-evaluate the stage and pick the next
    /// objective from the updated snapshot.
    ///
    /// `now` must be sampled once by the caller and passed in; the
    /// engine never reads the clock itself.
    pub fn run(
        &self,
        state: &DialogueState,
        message_text: &str,
        sender: SenderRole,
        now: Timestamp,
    ) -> StrategyOutcome {
        let mut next = state.clone();

        match sender {
            SenderRole::Counterpart => {
                let features = self.analyzer.analyze_counterpart(message_text);
                next.base_interest = self.interest.updated_base(next.base_interest, &features);
                // Decay reflects the silence before this message, so it
                // uses the prior timestamp; the caller stamps the new one
                // after the transition.
                next.freshness_multiplier =
                    self.freshness.multiplier(next.last_message_at.as_ref(), &now);
                next.effective_interest =
                    round2(next.base_interest * next.freshness_multiplier);
            }
            SenderRole::User => {
                let features = self.analyzer.analyze_user(message_text);
                if features.has_future_projection {
                    next.note_future_projection();
                }
                if features.has_telegram_invite {
                    next.note_telegram_invite_attempt();
                }
                if features.has_date_invite {
                    next.note_date_invite_attempt();
                }
            }
        }

        next.stage = self.stages.advanced(&next, next.effective_interest);
        let objective = self
            .policy
            .decide(next.stage, next.effective_interest, &next, &now);

        StrategyOutcome {
            state: next,
            objective,
        }
    }
}

/// Rounds to two decimal places, the precision effective interest is
/// stored at.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
