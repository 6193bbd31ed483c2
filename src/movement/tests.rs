//! Movement domain: tests for tuning defaults and velocity steering.

use bevy::math::Vec2;

use super::systems::movement::move_towards;
use super::{MovementInput, MovementTuning};

#[test]
fn test_movement_tuning_defaults_are_sane() {
    let tuning = MovementTuning::default();
    assert!(tuning.max_speed > 0.0);
    assert!(tuning.accel > 0.0);
    assert!(tuning.decel > 0.0);
}

#[test]
fn test_movement_input_starts_idle() {
    let input = MovementInput::default();
    assert_eq!(input.axis, Vec2::ZERO);
}

#[test]
fn test_move_towards_is_capped_by_rate() {
    let next = move_towards(Vec2::ZERO, Vec2::new(100.0, 0.0), 10.0);
    assert_eq!(next, Vec2::new(10.0, 0.0));
}

#[test]
fn test_move_towards_snaps_when_close() {
    let next = move_towards(Vec2::new(95.0, 0.0), Vec2::new(100.0, 0.0), 10.0);
    assert_eq!(next, Vec2::new(100.0, 0.0));
}
