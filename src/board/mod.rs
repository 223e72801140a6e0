//! Board representation and match-state types.
//!
//! Contains the core data structures for players, units, the tile grid,
//! and the authoritative cross-turn match state.

pub mod grid;
pub mod state;
pub mod unit;

pub use grid::{Grid, Marking};
pub use state::MatchState;
pub use unit::{
    Category, CategoryStats, Cell, Player, Roster, Unit, UnitId, ALL_UNITS, UNIT_COUNT,
};
