//! Application layer - use case orchestration.
//!
//! Handlers wire the pure strategy engine to its collaborators (clock,
//! dialogue store) and carry the caller obligations: one clock sample
//! per message, counter maintenance, and per-dialogue serialization.

pub mod handlers;
