//! Authoritative cross-turn match state.
//!
//! Tracks both players' readiness, the turn owner, a health/position
//! mirror for all six units, and one-shot win detection. This is the
//! source of truth a session reconciles against; `Unit` objects held by
//! the turn machine are derived views.

use super::unit::{Cell, Player, UnitId, ALL_UNITS, UNIT_COUNT};

/// Cross-turn authoritative state for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    ready: [bool; 2],
    turn_owner: Player,
    health: [u8; UNIT_COUNT],
    position: [Option<Cell>; UNIT_COUNT],
    game_over: bool,
    winner: Option<Player>,
}

impl MatchState {
    /// Creates a fresh match on a board of the given dimensions: all six
    /// units at base health on the starting layout, neither player ready,
    /// player 1 to move.
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut state = MatchState {
            ready: [false; 2],
            turn_owner: Player::One,
            health: [0; UNIT_COUNT],
            position: [None; UNIT_COUNT],
            game_over: false,
            winner: None,
        };
        state.deploy(cols, rows);
        state
    }

    fn deploy(&mut self, cols: u16, rows: u16) {
        for id in ALL_UNITS {
            self.health[id.index()] = id.category().stats().base_health;
            self.position[id.index()] = Some(id.starting_cell(cols, rows));
        }
    }

    /// Marks a player as ready.
    pub fn set_ready(&mut self, player: Player) {
        self.ready[player.index()] = true;
    }

    /// Returns true once both players are ready.
    pub fn all_ready(&self) -> bool {
        self.ready.iter().all(|&r| r)
    }

    /// Returns true if the given player is ready.
    pub fn is_ready(&self, player: Player) -> bool {
        self.ready[player.index()]
    }

    /// Returns the player currently permitted to act.
    pub fn turn_owner(&self) -> Player {
        self.turn_owner
    }

    /// Returns true if it is the given player's turn.
    pub fn is_players_turn(&self, player: Player) -> bool {
        self.turn_owner == player
    }

    /// Hands the turn to the opponent and returns the new owner.
    pub fn change_turns(&mut self) -> Player {
        self.turn_owner = self.turn_owner.opponent();
        self.turn_owner
    }

    /// Forces the turn owner, used when the peer announces a turn change.
    pub fn set_turn_owner(&mut self, player: Player) {
        self.turn_owner = player;
    }

    /// Returns the recorded health of a unit.
    pub fn health(&self, id: UnitId) -> u8 {
        self.health[id.index()]
    }

    /// Returns the recorded position of a unit, `None` once killed.
    pub fn position(&self, id: UnitId) -> Option<Cell> {
        self.position[id.index()]
    }

    /// Records a completed move.
    pub fn record_move(&mut self, id: UnitId, dest: Cell) {
        self.position[id.index()] = Some(dest);
    }

    /// Records an attack against a unit: health drops by the damage dealt,
    /// clamping at zero; a killed unit loses its board position.
    pub fn record_attack(&mut self, id: UnitId, damage: u8) {
        let idx = id.index();
        if self.health[idx] == 0 {
            return;
        }
        self.health[idx] = self.health[idx].saturating_sub(damage);
        if self.health[idx] == 0 {
            self.position[idx] = None;
        }
    }

    fn eliminated(&self, player: Player) -> bool {
        ALL_UNITS
            .iter()
            .filter(|id| id.owner() == player)
            .all(|id| self.health[id.index()] == 0)
    }

    /// Evaluates the win condition and returns the winner, if any.
    ///
    /// One-shot: once the match is decided, later health changes never
    /// alter the result. Should mutual elimination ever occur, player 1's
    /// defeat is checked first, so player 2 takes the win.
    pub fn determine_game_over(&mut self) -> Option<Player> {
        if self.game_over {
            return self.winner;
        }
        let winner = if self.eliminated(Player::One) {
            Some(Player::Two)
        } else if self.eliminated(Player::Two) {
            Some(Player::One)
        } else {
            None
        };
        if winner.is_some() {
            self.game_over = true;
            self.winner = winner;
        }
        winner
    }

    /// Returns true once the match has been decided.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Returns the winner once the match has been decided.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Reinitializes unit health and positions to the starting layout and
    /// clears both readiness flags. The turn owner and any decided result
    /// are match-scoped and survive; a rematch constructs a fresh state.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.deploy(cols, rows);
        self.ready = [false; 2];
    }
}
