//! Application command handlers.

mod advance_dialogue;

pub use advance_dialogue::{
    AdvanceDialogueCommand, AdvanceDialogueError, AdvanceDialogueHandler, AdvanceDialogueResult,
};
