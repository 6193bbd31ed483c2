//! Movement domain: top-down velocity integration.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{MovementInput, MovementTuning, Player};

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let dt = time.delta_secs();
    let target = input.axis * tuning.max_speed;

    for mut velocity in &mut query {
        let rate = if input.axis == Vec2::ZERO {
            tuning.decel
        } else {
            tuning.accel
        };
        let current = Vec2::new(velocity.x, velocity.y);
        let next = move_towards(current, target, rate * dt);
        velocity.x = next.x;
        velocity.y = next.y;
    }
}

pub(crate) fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + delta / distance * max_delta
    }
}
