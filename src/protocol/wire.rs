//! Peer wire-message notation.
//!
//! A compact text notation for the five messages two peers exchange
//! during a match. Each message is one line of space-separated tokens;
//! players and units travel as their wire digits. The types also derive
//! serde, so a transport that prefers a serde format can carry `Message`
//! directly instead of this notation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Cell, Player, UnitId};

/// Errors that can occur when parsing wire message strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown message '{0}'")]
    UnknownMessage(String),

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("invalid damage '{0}'")]
    InvalidDamage(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),
}

/// A message exchanged between the two peers of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// `ready <player>` -- the player is ready to start.
    Ready { player: Player },

    /// `move <unit> <col> <row>` -- the unit moved to the cell.
    Move { unit: UnitId, dest: Cell },

    /// `attack <unit> <damage>` -- the unit took the given damage.
    Attack { target: UnitId, damage: u8 },

    /// `turn <player>` -- the turn passed to the player.
    TurnChanged { player: Player },

    /// `gameover <player>` -- the match is decided.
    GameOver { winner: Player },
}

/// Formats a message in the wire notation.
pub fn format_message(msg: &Message) -> String {
    match msg {
        Message::Ready { player } => format!("ready {}", player.wire_id()),
        Message::Move { unit, dest } => {
            format!("move {} {} {}", unit.wire_id(), dest.col, dest.row)
        }
        Message::Attack { target, damage } => {
            format!("attack {} {}", target.wire_id(), damage)
        }
        Message::TurnChanged { player } => format!("turn {}", player.wire_id()),
        Message::GameOver { winner } => format!("gameover {}", winner.wire_id()),
    }
}

fn parse_player(tokens: &[&str], pos: usize) -> Result<Player, WireError> {
    let token = tokens.get(pos).ok_or(WireError::UnexpectedEnd("player"))?;
    token
        .parse::<u8>()
        .ok()
        .and_then(Player::from_wire_id)
        .ok_or_else(|| WireError::UnknownPlayer(token.to_string()))
}

fn parse_unit(tokens: &[&str], pos: usize) -> Result<UnitId, WireError> {
    let token = tokens.get(pos).ok_or(WireError::UnexpectedEnd("unit"))?;
    token
        .parse::<u8>()
        .ok()
        .and_then(UnitId::from_wire_id)
        .ok_or_else(|| WireError::UnknownUnit(token.to_string()))
}

fn parse_coordinate(tokens: &[&str], pos: usize) -> Result<u16, WireError> {
    let token = tokens
        .get(pos)
        .ok_or(WireError::UnexpectedEnd("coordinate"))?;
    token
        .parse::<u16>()
        .map_err(|_| WireError::InvalidCoordinate(token.to_string()))
}

/// Parses a single wire message string.
pub fn parse_message(s: &str) -> Result<Message, WireError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(WireError::EmptyInput);
    }

    let tokens: Vec<&str> = s.split_whitespace().collect();
    match tokens[0] {
        "ready" => Ok(Message::Ready {
            player: parse_player(&tokens, 1)?,
        }),

        "move" => {
            let unit = parse_unit(&tokens, 1)?;
            let col = parse_coordinate(&tokens, 2)?;
            let row = parse_coordinate(&tokens, 3)?;
            Ok(Message::Move {
                unit,
                dest: Cell::new(col, row),
            })
        }

        "attack" => {
            let target = parse_unit(&tokens, 1)?;
            let token = tokens.get(2).ok_or(WireError::UnexpectedEnd("damage"))?;
            let damage = token
                .parse::<u8>()
                .map_err(|_| WireError::InvalidDamage(token.to_string()))?;
            Ok(Message::Attack { target, damage })
        }

        "turn" => Ok(Message::TurnChanged {
            player: parse_player(&tokens, 1)?,
        }),

        "gameover" => Ok(Message::GameOver {
            winner: parse_player(&tokens, 1)?,
        }),

        other => Err(WireError::UnknownMessage(other.to_string())),
    }
}
