//! Skirmish engine library.
//!
//! Exposes the board representation, combat rules, turn state machine,
//! and protocol modules for use by integration tests and the binary
//! entry point.

pub mod board;
pub mod engine;
pub mod protocol;
pub mod rules;
pub mod snapshot;
pub mod turn;
