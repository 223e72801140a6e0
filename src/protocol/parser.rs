//! SUI command parser.
//!
//! Parses incoming SUI protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use crate::board::Player;

/// A parsed UI-to-engine SUI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the SUI protocol handshake.
    Sui,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Declare which side this session plays.
    SetPlayer { player: Player },

    /// Start a fresh match using the configured board dimensions.
    NewMatch,

    /// Mark the local player ready.
    Ready,

    /// A click at the given grid cell, already mapped from pointer
    /// coordinates by the UI.
    Click { col: u16, row: u16 },

    /// Deliver a raw wire message received from the peer.
    Peer { raw: String },

    /// Print the current session state as one JSON line.
    State,

    /// Terminate the engine process.
    Quit,
}

/// Parses one line of input into a command.
///
/// Returns `None` for empty lines and anything unrecognized; the main
/// loop ignores those silently.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let head = tokens.next()?;

    match head {
        "sui" => Some(Command::Sui),
        "isready" => Some(Command::IsReady),
        "setoption" => parse_setoption(line),
        "setplayer" => {
            let digit = tokens.next()?.parse::<u8>().ok()?;
            Player::from_wire_id(digit).map(|player| Command::SetPlayer { player })
        }
        "newmatch" => Some(Command::NewMatch),
        "ready" => Some(Command::Ready),
        "click" => {
            let col = tokens.next()?.parse::<u16>().ok()?;
            let row = tokens.next()?.parse::<u16>().ok()?;
            Some(Command::Click { col, row })
        }
        "peer" => {
            let raw = line.strip_prefix("peer")?.trim();
            if raw.is_empty() {
                return None;
            }
            Some(Command::Peer {
                raw: raw.to_string(),
            })
        }
        "state" => Some(Command::State),
        "quit" => Some(Command::Quit),
        _ => None,
    }
}

/// Parses `setoption name <id> [value <x>]`. The option name is a single
/// token; the value, when present, is everything after `value`.
fn parse_setoption(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("setoption")?.trim();
    let rest = rest.strip_prefix("name")?.trim();

    let (name, value) = match rest.split_once(" value ") {
        Some((name, value)) => (name.trim(), Some(value.trim().to_string())),
        None => (rest, None),
    };
    if name.is_empty() {
        return None;
    }
    Some(Command::SetOption {
        name: name.to_string(),
        value,
    })
}
