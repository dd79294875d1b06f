//! Interest scoring model.
//!
//! Folds counterpart-message features into the base interest score. User
//! messages never pass through here; they cannot change how interested
//! the counterpart appears.

use crate::config::{InterestWeights, ScoreBounds};

use super::features::CounterpartFeatures;

/// Applies configured feature weights to the base interest score.
#[derive(Debug, Clone)]
pub struct InterestModel {
    weights: InterestWeights,
    bounds: ScoreBounds,
}

impl InterestModel {
    /// Creates a model with the given weights and clamping bounds.
    pub fn new(weights: InterestWeights, bounds: ScoreBounds) -> Self {
        Self { weights, bounds }
    }

    /// Returns the new base score after one counterpart message.
    ///
    /// Each detected feature contributes its configured weight; the sum
    /// is applied to the old base and clamped into the score bounds.
    pub fn updated_base(&self, old_base: f64, features: &CounterpartFeatures) -> f64 {
        let w = &self.weights;
        let mut delta = 0.0;

        if features.has_question {
            delta += w.question;
        }
        if features.has_emoji {
            delta += w.emoji;
        }
        if features.is_long {
            delta += w.long_message;
        }
        if features.has_personal_disclosure {
            delta += w.personal_disclosure;
        }
        if features.is_short {
            delta += w.short_message;
        }

        self.bounds.clamp(old_base + delta)
    }
}
