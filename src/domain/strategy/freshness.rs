//! Freshness decay.
//!
//! The longer the counterpart's silence, the less their accumulated
//! interest should count. Elapsed time since the previous message maps
//! to a multiplier through ordered tiers; beyond the last tier the
//! configured floor applies.

use crate::config::FreshnessPolicy;
use crate::domain::foundation::Timestamp;

/// Maps elapsed silence to an interest multiplier.
#[derive(Debug, Clone)]
pub struct FreshnessDecay {
    policy: FreshnessPolicy,
}

impl FreshnessDecay {
    /// Creates a decay calculator from the tier policy.
    pub fn new(policy: FreshnessPolicy) -> Self {
        Self { policy }
    }

    /// Returns the multiplier for the silence between `last_message_at`
    /// and `now`.
    ///
    /// `None` means no prior message, which carries no decay. Otherwise
    /// the first tier whose hour bound strictly exceeds the elapsed
    /// hours wins; a silence at or beyond every bound gets the floor.
    pub fn multiplier(&self, last_message_at: Option<&Timestamp>, now: &Timestamp) -> f64 {
        let last = match last_message_at {
            Some(ts) => ts,
            None => return 1.0,
        };

        let diff_hours = now.hours_since(last);
        for tier in &self.policy.tiers {
            if diff_hours < tier.within_hours {
                return tier.multiplier;
            }
        }
        self.policy.floor_multiplier
    }
}
