//! Attack legality and damage application.

use crate::board::{Cell, Grid, Unit, UnitId};

/// The result of a resolved attack, propagated to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub target: UnitId,
    pub damage: u8,
}

/// Returns true if the attacker may strike `target_cell`: the cell lies
/// within the attacker's attack range and holds an opposing unit.
pub fn validate_attack(attacker: &Unit, target_cell: Cell, grid: &Grid) -> bool {
    attacker
        .attack_range(grid.cols(), grid.rows())
        .contains(&target_cell)
        && matches!(
            grid.occupant(target_cell),
            Some(id) if id.owner() != attacker.id.owner()
        )
}

/// Returns true if any enemy unit currently stands in the attacker's
/// attack range; decides whether a completed move offers an attack.
pub fn enemy_in_attack_range(attacker: &Unit, grid: &Grid) -> bool {
    attacker
        .attack_range(grid.cols(), grid.rows())
        .iter()
        .any(|&cell| {
            matches!(
                grid.occupant(cell),
                Some(id) if id.owner() != attacker.id.owner()
            )
        })
}

/// Applies the given damage to the defender, removing it from the grid if
/// it dies. Shared by locally resolved attacks and attacks reported by
/// the peer.
pub fn apply_damage_to(defender: &mut Unit, damage: u8, grid: &mut Grid) {
    defender.apply_damage(damage);
    if !defender.is_alive() {
        if let Some(cell) = defender.position.take() {
            grid.set_occupant(cell, None);
        }
    }
}

/// Resolves an attack for the attacker's full power and returns the
/// report to send to the peer.
///
/// Does not re-validate; call `validate_attack` first.
pub fn apply_attack(attacker: &Unit, defender: &mut Unit, grid: &mut Grid) -> AttackReport {
    let damage = attacker.attack_power();
    apply_damage_to(defender, damage, grid);
    AttackReport {
        target: defender.id,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(id: UnitId, cell: Cell, grid: &mut Grid) -> Unit {
        let mut unit = Unit::new(id);
        unit.position = Some(cell);
        grid.set_occupant(cell, Some(id));
        unit
    }

    #[test]
    fn adjacent_enemy_is_attackable() {
        let mut grid = Grid::new(8, 8);
        let attacker = placed(UnitId::P1Heavy, Cell::new(3, 3), &mut grid);
        placed(UnitId::P2Light, Cell::new(4, 3), &mut grid);
        assert!(validate_attack(&attacker, Cell::new(4, 3), &grid));
    }

    #[test]
    fn own_unit_is_not_attackable() {
        let mut grid = Grid::new(8, 8);
        let attacker = placed(UnitId::P1Heavy, Cell::new(3, 3), &mut grid);
        placed(UnitId::P1Light, Cell::new(3, 4), &mut grid);
        assert!(!validate_attack(&attacker, Cell::new(3, 4), &grid));
    }

    #[test]
    fn diagonal_and_distant_cells_are_out_of_range() {
        let mut grid = Grid::new(8, 8);
        let attacker = placed(UnitId::P1Heavy, Cell::new(3, 3), &mut grid);
        placed(UnitId::P2Light, Cell::new(4, 4), &mut grid);
        placed(UnitId::P2Medium, Cell::new(6, 3), &mut grid);
        assert!(!validate_attack(&attacker, Cell::new(4, 4), &grid));
        assert!(!validate_attack(&attacker, Cell::new(6, 3), &grid));
    }

    #[test]
    fn empty_cell_is_not_attackable() {
        let mut grid = Grid::new(8, 8);
        let attacker = placed(UnitId::P1Heavy, Cell::new(3, 3), &mut grid);
        assert!(!validate_attack(&attacker, Cell::new(4, 3), &grid));
    }

    #[test]
    fn enemy_detection_after_move() {
        let mut grid = Grid::new(8, 8);
        let attacker = placed(UnitId::P1Light, Cell::new(2, 0), &mut grid);
        assert!(!enemy_in_attack_range(&attacker, &grid));
        placed(UnitId::P2Light, Cell::new(3, 0), &mut grid);
        assert!(enemy_in_attack_range(&attacker, &grid));
    }

    #[test]
    fn apply_attack_reports_damage() {
        let mut grid = Grid::new(8, 8);
        let attacker = placed(UnitId::P1Medium, Cell::new(3, 3), &mut grid); // power 2
        let mut defender = placed(UnitId::P2Heavy, Cell::new(4, 3), &mut grid);

        let report = apply_attack(&attacker, &mut defender, &mut grid);
        assert_eq!(report.target, UnitId::P2Heavy);
        assert_eq!(report.damage, 2);
        assert_eq!(defender.health, 8);
        assert!(defender.is_alive());
        assert_eq!(grid.occupant(Cell::new(4, 3)), Some(UnitId::P2Heavy));
    }

    #[test]
    fn lethal_attack_vacates_the_grid() {
        let mut grid = Grid::new(8, 8);
        let attacker = placed(UnitId::P1Heavy, Cell::new(3, 3), &mut grid); // power 4
        let mut defender = placed(UnitId::P2Light, Cell::new(4, 3), &mut grid);
        defender.health = 3;

        let report = apply_attack(&attacker, &mut defender, &mut grid);
        assert_eq!(report.damage, 4);
        assert!(!defender.is_alive());
        assert_eq!(defender.position, None);
        assert_eq!(grid.occupant(Cell::new(4, 3)), None);
    }
}
