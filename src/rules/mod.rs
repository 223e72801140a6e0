//! Combat rules.
//!
//! Pure decision functions for move and attack legality, and their apply
//! counterparts. Deciding and acting are split so tests can probe
//! decisions independently of mutation; apply functions trust that the
//! caller validated first.

pub mod combat;
pub mod movement;

pub use combat::{
    apply_attack, apply_damage_to, enemy_in_attack_range, validate_attack, AttackReport,
};
pub use movement::{apply_move, self_target_cancel, validate_move};
