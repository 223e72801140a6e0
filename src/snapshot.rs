//! Serializable view of a live session.
//!
//! Captures everything a UI needs to redraw: readiness, turn owner,
//! phase, per-unit health and position, and the decided result. Printed
//! as one JSON line by the `state` command.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Player, ALL_UNITS};
use crate::engine::MatchSession;
use crate::turn::TurnPhase;

/// One unit's visible state, keyed by wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub unit: u8,
    pub health: u8,
    pub position: Option<Cell>,
}

/// The full session state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub cols: u16,
    pub rows: u16,
    pub ready: [bool; 2],
    pub turn_owner: u8,
    pub phase: TurnPhase,
    pub units: Vec<UnitSnapshot>,
    pub game_over: bool,
    pub winner: Option<u8>,
}

impl MatchSnapshot {
    /// Captures the current state of a session.
    pub fn capture(session: &MatchSession) -> Self {
        let state = &session.state;
        MatchSnapshot {
            cols: session.grid.cols(),
            rows: session.grid.rows(),
            ready: [state.is_ready(Player::One), state.is_ready(Player::Two)],
            turn_owner: state.turn_owner().wire_id(),
            phase: session.turn.phase(),
            units: ALL_UNITS
                .iter()
                .map(|&id| UnitSnapshot {
                    unit: id.wire_id(),
                    health: state.health(id),
                    position: state.position(id),
                })
                .collect(),
            game_over: state.game_over(),
            winner: state.winner().map(|p| p.wire_id()),
        }
    }
}
