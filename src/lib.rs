//! Wingmate - AI Dating Copilot Strategy Core
//!
//! This crate implements the conversation-progression strategy engine that
//! decides, for every inbound message, what the copilot should try to
//! accomplish next in a dialogue: keep talking, move to Telegram, propose
//! a date, recover a fading conversation, or re-engage after silence.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
