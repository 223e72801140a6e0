//! Players, unit identities, and per-unit runtime state.
//!
//! Each side fields three units, one per category. A unit's category fixes
//! its stats at creation; only health and position change during play.
//! Unit metadata (owner, category, stats) is resolved at compile time from
//! the `UnitId` discriminant.

use serde::{Deserialize, Serialize};

/// The number of units in a match, three per side.
pub const UNIT_COUNT: usize = 6;

/// One of the two sides in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the other side.
    pub const fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the 0-based array index for this player.
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Returns the wire digit used in peer messages.
    pub const fn wire_id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parses a player from its wire digit.
    pub fn from_wire_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

/// One of three stat presets shared by the two mirrored unit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Light,
    Medium,
    Heavy,
}

/// Fixed combat stats of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStats {
    pub base_health: u8,
    pub attack_power: u8,
    pub speed: u8,
}

impl Category {
    /// Returns the fixed stats for this category.
    pub const fn stats(self) -> CategoryStats {
        match self {
            Category::Light => CategoryStats {
                base_health: 5,
                attack_power: 1,
                speed: 2,
            },
            Category::Medium => CategoryStats {
                base_health: 8,
                attack_power: 2,
                speed: 3,
            },
            Category::Heavy => CategoryStats {
                base_health: 10,
                attack_power: 4,
                speed: 5,
            },
        }
    }

    /// Maximum reachable health: one point above base, so a unit can be
    /// healed slightly past its starting value.
    pub const fn max_health(self) -> u8 {
        self.stats().base_health + 1
    }
}

/// A fixed unit identity. Six per match, created once and never recreated;
/// a killed unit keeps its identity but loses board presence.
///
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UnitId {
    P1Light = 0,
    P1Medium = 1,
    P1Heavy = 2,
    P2Light = 3,
    P2Medium = 4,
    P2Heavy = 5,
}

/// All six unit identities in wire-id order.
pub const ALL_UNITS: [UnitId; UNIT_COUNT] = [
    UnitId::P1Light,
    UnitId::P1Medium,
    UnitId::P1Heavy,
    UnitId::P2Light,
    UnitId::P2Medium,
    UnitId::P2Heavy,
];

impl UnitId {
    /// Returns the 0-based array index for this unit.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the wire id used in peer messages: 1-3 for player 1,
    /// 4-6 for player 2.
    pub const fn wire_id(self) -> u8 {
        self as u8 + 1
    }

    /// Parses a unit id from its wire id.
    pub fn from_wire_id(id: u8) -> Option<UnitId> {
        match id {
            1 => Some(UnitId::P1Light),
            2 => Some(UnitId::P1Medium),
            3 => Some(UnitId::P1Heavy),
            4 => Some(UnitId::P2Light),
            5 => Some(UnitId::P2Medium),
            6 => Some(UnitId::P2Heavy),
            _ => None,
        }
    }

    /// Returns the side that owns this unit.
    pub const fn owner(self) -> Player {
        match self {
            UnitId::P1Light | UnitId::P1Medium | UnitId::P1Heavy => Player::One,
            UnitId::P2Light | UnitId::P2Medium | UnitId::P2Heavy => Player::Two,
        }
    }

    /// Returns the stat category of this unit.
    pub const fn category(self) -> Category {
        match self {
            UnitId::P1Light | UnitId::P2Light => Category::Light,
            UnitId::P1Medium | UnitId::P2Medium => Category::Medium,
            UnitId::P1Heavy | UnitId::P2Heavy => Category::Heavy,
        }
    }

    /// Returns the fixed starting cell for this unit on a board of the
    /// given dimensions: player 1 on the left edge at the top, middle, and
    /// bottom rows, player 2 mirrored on the right edge.
    pub fn starting_cell(self, cols: u16, rows: u16) -> Cell {
        let col = match self.owner() {
            Player::One => 0,
            Player::Two => cols - 1,
        };
        let row = match self.category() {
            Category::Light => 0,
            Category::Medium => rows / 2,
            Category::Heavy => rows - 1,
        };
        Cell { col, row }
    }
}

/// A board position as (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: u16,
    pub row: u16,
}

impl Cell {
    /// Creates a cell from column and row.
    pub const fn new(col: u16, row: u16) -> Self {
        Cell { col, row }
    }

    /// Returns the cell offset by `(dc, dr)`, or `None` if either
    /// coordinate leaves `[0, cols) x [0, rows)`.
    ///
    /// Every range computation goes through this one bounds check, so no
    /// direction can acquire its own off-by-one.
    pub fn offset(self, dc: i32, dr: i32, cols: u16, rows: u16) -> Option<Cell> {
        let col = i32::from(self.col) + dc;
        let row = i32::from(self.row) + dr;
        if col < 0 || row < 0 || col >= i32::from(cols) || row >= i32::from(rows) {
            return None;
        }
        Some(Cell {
            col: col as u16,
            row: row as u16,
        })
    }
}

/// The eight movement directions: the four axes, then the four diagonals.
const MOVE_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// The four orthogonal attack directions.
const ATTACK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A unit's runtime state. Identity and stats are fixed; health and
/// position are the only mutable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub health: u8,
    pub position: Option<Cell>,
}

impl Unit {
    /// Creates a unit at base health with no board position.
    pub fn new(id: UnitId) -> Self {
        Unit {
            id,
            health: id.category().stats().base_health,
            position: None,
        }
    }

    /// Returns true while the unit has health remaining.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Returns the unit's fixed attack power.
    pub fn attack_power(&self) -> u8 {
        self.id.category().stats().attack_power
    }

    /// Returns the unit's fixed movement speed.
    pub fn speed(&self) -> u8 {
        self.id.category().stats().speed
    }

    /// Returns the unit's health ceiling.
    pub fn max_health(&self) -> u8 {
        self.id.category().max_health()
    }

    /// Subtracts the given amount from health, clamping at zero.
    /// Damaging an already-dead unit is a no-op.
    pub fn apply_damage(&mut self, amount: u8) {
        if !self.is_alive() {
            return;
        }
        self.health = self.health.saturating_sub(amount);
    }

    /// Adds the given amount to health, clamping at `max_health`.
    ///
    /// No current action heals, but health tiles land here when they gain
    /// an effect, so the contract is part of the stable API.
    pub fn heal(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(self.max_health());
    }

    /// Returns the cells this unit can move to: the eight positions offset
    /// by exactly `speed` along each axis and diagonal, restricted to the
    /// board. Intermediate distances are not reachable.
    pub fn movement_range(&self, cols: u16, rows: u16) -> Vec<Cell> {
        let pos = match self.position {
            Some(p) => p,
            None => return Vec::new(),
        };
        let speed = i32::from(self.speed());
        MOVE_DIRECTIONS
            .iter()
            .filter_map(|&(dc, dr)| pos.offset(dc * speed, dr * speed, cols, rows))
            .collect()
    }

    /// Returns the cells this unit can attack from its current position:
    /// the four orthogonally adjacent cells, restricted to the board.
    /// Meaningful only after the unit has completed its move.
    pub fn attack_range(&self, cols: u16, rows: u16) -> Vec<Cell> {
        let pos = match self.position {
            Some(p) => p,
            None => return Vec::new(),
        };
        ATTACK_DIRECTIONS
            .iter()
            .filter_map(|&(dc, dr)| pos.offset(dc, dr, cols, rows))
            .collect()
    }
}

/// The six units of a match, indexed by `UnitId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    units: [Unit; UNIT_COUNT],
}

impl Roster {
    /// Creates all six units at base health, unplaced.
    pub fn new() -> Self {
        Roster {
            units: ALL_UNITS.map(Unit::new),
        }
    }

    /// Returns the unit with the given identity.
    pub fn get(&self, id: UnitId) -> &Unit {
        &self.units[id.index()]
    }

    /// Returns the unit with the given identity, mutably.
    pub fn get_mut(&mut self, id: UnitId) -> &mut Unit {
        &mut self.units[id.index()]
    }

    /// Returns the living unit occupying the given cell, if any.
    pub fn unit_at(&self, cell: Cell) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.is_alive() && u.position == Some(cell))
    }
}
