//! The conversation-progression strategy engine.
//!
//! A pure, deterministic decision core. Message text flows one way
//! through it: text -> features -> interest and counters -> effective
//! interest -> stage -> objective. No component calls back into an
//! earlier one, and nothing here performs I/O or reads a clock.

mod analyzer;
mod engine;
mod features;
mod freshness;
mod interest;
mod objective;
mod stage;
mod state;

pub use analyzer::MessageAnalyzer;
pub use engine::{StrategyEngine, StrategyOutcome};
pub use features::{CounterpartFeatures, SenderRole, UserFeatures};
pub use freshness::FreshnessDecay;
pub use interest::InterestModel;
pub use objective::{Objective, ObjectivePolicy};
pub use stage::{DialogueStage, StageMachine};
pub use state::{Channel, DialogueState};
