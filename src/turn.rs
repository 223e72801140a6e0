//! Turn-phase sequencing logic.
//!
//! Drives one player's turn from unit selection through movement to the
//! optional attack and the turn handoff. The machine owns its phase and
//! selection and exposes `handle_click` as the only mutator, so every
//! transition is centrally auditable.
//!
//! Phase flow:
//! - SelectUnit -> Moving        (own unit clicked)
//! - Moving     -> Attacking     (legal move with an enemy in reach)
//! - Moving     -> EndTurn       (legal move, no attack opportunity)
//! - Moving     -> SelectUnit    (cancel or illegal destination)
//! - Attacking  -> EndTurn       (attack resolved or forfeited)
//! - EndTurn    -> SelectUnit    (win evaluation, turn owner flips)

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Grid, Marking, MatchState, Player, Roster, UnitId};
use crate::rules::{combat, movement, AttackReport};

/// The sub-state a player's turn passes through. Exactly one is active;
/// `EndTurn` is processed synchronously and never rests between clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    SelectUnit,
    Moving,
    Attacking,
    EndTurn,
}

/// The result of one click fed through the state machine. Illegal clicks
/// resolve to `Ignored` or a reset outcome, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click had no effect.
    Ignored,
    /// A unit was selected; its movement range is highlighted.
    Selected(UnitId),
    /// The player clicked the selected unit to back out of moving.
    MoveCancelled,
    /// The destination was illegal; selection cleared.
    MoveRejected,
    /// The unit moved. If no enemy is in reach the turn ended in the
    /// same call.
    Moved {
        unit: UnitId,
        dest: Cell,
        attack_offered: bool,
    },
    /// An attack resolved and the turn ended.
    Attacked(AttackReport),
    /// The attack was forfeited and the turn ended.
    AttackForfeited,
}

/// The per-turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnEngine {
    phase: TurnPhase,
    selected: Option<UnitId>,
}

impl TurnEngine {
    /// Creates a machine at the start of a turn, nothing selected.
    pub fn new() -> Self {
        TurnEngine {
            phase: TurnPhase::SelectUnit,
            selected: None,
        }
    }

    /// Returns the active phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Returns the currently selected unit, if any.
    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    /// Feeds one click from the acting player through the machine.
    ///
    /// Turn ownership is enforced at the session boundary; this machine
    /// assumes `player` is the turn owner.
    pub fn handle_click(
        &mut self,
        player: Player,
        cell: Cell,
        roster: &mut Roster,
        grid: &mut Grid,
        state: &mut MatchState,
    ) -> ClickOutcome {
        match self.phase {
            TurnPhase::SelectUnit => self.select_unit(player, cell, roster, grid),
            TurnPhase::Moving => self.move_selected(cell, roster, grid, state),
            TurnPhase::Attacking => self.attack_with_selected(cell, roster, grid, state),
            // Entered automatically, never via click.
            TurnPhase::EndTurn => ClickOutcome::Ignored,
        }
    }

    fn select_unit(
        &mut self,
        player: Player,
        cell: Cell,
        roster: &Roster,
        grid: &mut Grid,
    ) -> ClickOutcome {
        let id = match grid.occupant(cell) {
            Some(id) if id.owner() == player => id,
            _ => return ClickOutcome::Ignored,
        };
        let unit = roster.get(id);
        if !unit.is_alive() {
            return ClickOutcome::Ignored;
        }

        for c in unit.movement_range(grid.cols(), grid.rows()) {
            grid.set_marking(c, Marking::Movable);
        }
        self.selected = Some(id);
        self.phase = TurnPhase::Moving;
        ClickOutcome::Selected(id)
    }

    fn move_selected(
        &mut self,
        cell: Cell,
        roster: &mut Roster,
        grid: &mut Grid,
        state: &mut MatchState,
    ) -> ClickOutcome {
        let id = match self.selected {
            Some(id) => id,
            None => return ClickOutcome::Ignored,
        };
        let unit = *roster.get(id);

        if movement::self_target_cancel(&unit, cell) {
            grid.clear_markings(Marking::Movable);
            self.selected = None;
            self.phase = TurnPhase::SelectUnit;
            return ClickOutcome::MoveCancelled;
        }

        if grid.in_movement_range(cell) && movement::validate_move(&unit, cell, grid) {
            movement::apply_move(roster.get_mut(id), cell, grid);
            state.record_move(id, cell);
            grid.clear_markings(Marking::Movable);

            let moved = *roster.get(id);
            if combat::enemy_in_attack_range(&moved, grid) {
                for c in moved.attack_range(grid.cols(), grid.rows()) {
                    grid.set_marking(c, Marking::Attackable);
                }
                self.phase = TurnPhase::Attacking;
                return ClickOutcome::Moved {
                    unit: id,
                    dest: cell,
                    attack_offered: true,
                };
            }

            self.end_turn(state);
            return ClickOutcome::Moved {
                unit: id,
                dest: cell,
                attack_offered: false,
            };
        }

        // Illegal destination: clear the highlight and make the player
        // reselect.
        grid.clear_markings(Marking::Movable);
        self.selected = None;
        self.phase = TurnPhase::SelectUnit;
        ClickOutcome::MoveRejected
    }

    fn attack_with_selected(
        &mut self,
        cell: Cell,
        roster: &mut Roster,
        grid: &mut Grid,
        state: &mut MatchState,
    ) -> ClickOutcome {
        let id = match self.selected {
            Some(id) => id,
            None => return ClickOutcome::Ignored,
        };
        let attacker = *roster.get(id);

        if !movement::self_target_cancel(&attacker, cell)
            && grid.in_attack_range(cell)
            && combat::validate_attack(&attacker, cell, grid)
        {
            if let Some(target) = grid.occupant(cell) {
                let report = combat::apply_attack(&attacker, roster.get_mut(target), grid);
                state.record_attack(report.target, report.damage);
                grid.clear_markings(Marking::Attackable);
                self.end_turn(state);
                return ClickOutcome::Attacked(report);
            }
        }

        // Clicking the selected unit, or anywhere unattackable, forfeits.
        grid.clear_markings(Marking::Attackable);
        self.end_turn(state);
        ClickOutcome::AttackForfeited
    }

    /// Processes the terminal phase: evaluates the win condition, hands
    /// the turn to the opponent, and arms a fresh selection.
    fn end_turn(&mut self, state: &mut MatchState) {
        self.phase = TurnPhase::EndTurn;
        state.determine_game_over();
        state.change_turns();
        self.selected = None;
        self.phase = TurnPhase::SelectUnit;
    }
}
