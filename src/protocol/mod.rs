//! SUI protocol handling.
//!
//! This module implements the SUI (Skirmish Universal Interface)
//! protocol: the peer wire-message notation and the command parser for
//! the main loop.

pub mod parser;
pub mod wire;

pub use parser::{parse_command, Command};
pub use wire::{format_message, parse_message, Message, WireError};
