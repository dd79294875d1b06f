//! AdvanceDialogue command handler.
//!
//! The message-ingestion seam: every inbound message (either side, either
//! channel) runs exactly one strategy transition. The handler owns the
//! caller obligations the engine cannot: sampling the clock once,
//! maintaining the message counters and the last-message timestamp, and
//! guaranteeing at most one in-flight transition per dialogue id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{self, StrategyConfig};
use crate::domain::foundation::DialogueId;
use crate::domain::strategy::{
    Channel, DialogueState, Objective, SenderRole, StrategyEngine,
};
use crate::ports::{Clock, DialogueStore, DialogueStoreError, Version};

/// Command to advance a dialogue with one inbound message.
#[derive(Debug, Clone)]
pub struct AdvanceDialogueCommand {
    /// The dialogue the message belongs to.
    pub dialogue_id: DialogueId,
    /// The message text.
    pub text: String,
    /// Who authored the message.
    pub sender: SenderRole,
    /// Where the message was exchanged.
    pub channel: Channel,
}

impl AdvanceDialogueCommand {
    /// Creates a new advance command.
    pub fn new(
        dialogue_id: DialogueId,
        text: impl Into<String>,
        sender: SenderRole,
        channel: Channel,
    ) -> Self {
        Self {
            dialogue_id,
            text: text.into(),
            sender,
            channel,
        }
    }
}

/// Result of advancing a dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceDialogueResult {
    /// The persisted snapshot after the transition.
    pub state: DialogueState,
    /// The objective for the next drafted message.
    pub objective: Objective,
    /// Whether this message moved the dialogue to a later stage.
    pub stage_changed: bool,
    /// Version the snapshot was written at.
    pub version: Version,
}

/// Errors that can occur when advancing a dialogue.
///
/// The engine itself is total; everything that can fail lives at the
/// persistence seam.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvanceDialogueError {
    /// Store error during load or persist.
    #[error("Store error: {0}")]
    Store(#[from] DialogueStoreError),
}

/// Handles strategy transitions for inbound messages.
///
/// Holds a per-dialogue async lock map so concurrent messages for the
/// same dialogue are processed one at a time; transitions for different
/// dialogues run freely in parallel. The optimistic version check in the
/// store remains as a second guard against writers outside this handler.
pub struct AdvanceDialogueHandler {
    engine: StrategyEngine,
    opening_state: DialogueState,
    store: Arc<dyn DialogueStore>,
    clock: Arc<dyn Clock>,
    locks: Mutex<HashMap<DialogueId, Arc<tokio::sync::Mutex<()>>>>,
}

impl AdvanceDialogueHandler {
    /// Creates a handler from a validated policy and its collaborators.
    ///
    /// # Errors
    ///
    /// Fails only on an emoji pattern that does not compile, which
    /// configuration validation reports at load time.
    pub fn new(
        config: &StrategyConfig,
        store: Arc<dyn DialogueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, config::ValidationError> {
        Ok(Self {
            engine: StrategyEngine::new(config)?,
            opening_state: DialogueState::opened(config),
            store,
            clock,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Runs one strategy transition for an inbound message and persists
    /// the result.
    ///
    /// A dialogue that has never been stored starts from the opening
    /// snapshot. The message counters are bumped before the engine runs
    /// so stage rules see the triggering message; the last-message
    /// timestamp is stamped after, so freshness decay measures the
    /// silence that preceded it.
    pub async fn advance(
        &self,
        cmd: AdvanceDialogueCommand,
    ) -> Result<AdvanceDialogueResult, AdvanceDialogueError> {
        let dialogue_lock = self.lock_for(cmd.dialogue_id);
        let _guard = dialogue_lock.lock().await;

        let now = self.clock.now();
        let (mut state, version) = self.load_or_open(&cmd.dialogue_id).await?;
        let prior_stage = state.stage;

        state.note_message(cmd.channel);

        debug!(
            dialogue_id = %cmd.dialogue_id,
            sender = ?cmd.sender,
            channel = ?cmd.channel,
            "Running strategy transition"
        );

        let outcome = self.engine.run(&state, &cmd.text, cmd.sender, now);
        let mut new_state = outcome.state;
        new_state.touch(now);

        let new_version = self
            .store
            .save(&cmd.dialogue_id, new_state.clone(), version)
            .await?;

        let stage_changed = new_state.stage != prior_stage;
        if stage_changed {
            info!(
                dialogue_id = %cmd.dialogue_id,
                from = prior_stage.label(),
                to = new_state.stage.label(),
                "Dialogue stage advanced"
            );
        }
        debug!(
            dialogue_id = %cmd.dialogue_id,
            objective = outcome.objective.label(),
            effective_interest = new_state.effective_interest,
            "Objective decided"
        );

        Ok(AdvanceDialogueResult {
            state: new_state,
            objective: outcome.objective,
            stage_changed,
            version: new_version,
        })
    }

    /// Records the external confirmation that the counterpart moved to
    /// Telegram.
    ///
    /// Monotonic: a repeated confirmation is a no-op. The stage itself
    /// advances on the next message transition; this only flips the
    /// flag the stage rules read.
    pub async fn mark_telegram_confirmed(
        &self,
        dialogue_id: DialogueId,
    ) -> Result<(), AdvanceDialogueError> {
        let dialogue_lock = self.lock_for(dialogue_id);
        let _guard = dialogue_lock.lock().await;

        let (mut state, version) = self.load_or_open(&dialogue_id).await?;
        if state.is_on_telegram {
            return Ok(());
        }
        state.confirm_telegram();
        self.store.save(&dialogue_id, state, version).await?;

        info!(dialogue_id = %dialogue_id, "Telegram confirmed");
        Ok(())
    }

    async fn load_or_open(
        &self,
        id: &DialogueId,
    ) -> Result<(DialogueState, Version), AdvanceDialogueError> {
        let loaded = self.store.find(id).await?;
        Ok(match loaded {
            Some(row) => (row.state, row.version),
            None => (self.opening_state.clone(), Version::initial()),
        })
    }

    fn lock_for(&self, id: DialogueId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(id).or_default().clone()
    }
}
