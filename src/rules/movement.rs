//! Move legality and application.

use crate::board::{Cell, Grid, Unit};

/// Returns true if the unit may move to `dest`: the cell is within the
/// unit's movement range and unoccupied. Moving onto any unit, friendly
/// or enemy, is illegal; there is no swap and no move-to-attack.
pub fn validate_move(unit: &Unit, dest: Cell, grid: &Grid) -> bool {
    unit.movement_range(grid.cols(), grid.rows()).contains(&dest)
        && grid.occupant(dest).is_none()
}

/// Moves the unit to `dest`: vacates its old cell, occupies the new one,
/// and updates the unit's position.
///
/// Does not re-validate; call `validate_move` first.
pub fn apply_move(unit: &mut Unit, dest: Cell, grid: &mut Grid) {
    if let Some(old) = unit.position {
        grid.set_occupant(old, None);
    }
    grid.set_occupant(dest, Some(unit.id));
    unit.position = Some(dest);
}

/// Returns true when the clicked cell is the acting unit's own position.
/// Used to let a player back out of a move or forfeit an attack without
/// the click being treated as illegal.
pub fn self_target_cancel(unit: &Unit, clicked: Cell) -> bool {
    unit.position == Some(clicked)
}
