//! Combat domain: hostile spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{Health, Hostile};
use crate::movement::GameLayer;

const HOSTILE_SIZE: f32 = 22.0;

/// Bundle for a wave hostile
#[derive(Bundle)]
pub struct HostileBundle {
    pub hostile: Hostile,
    pub health: Health,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub damping: LinearDamping,
    pub locked_axes: LockedAxes,
}

impl HostileBundle {
    pub fn new(position: Vec2, base_health: f32) -> Self {
        Self {
            hostile: Hostile,
            health: Health::new(base_health),
            sprite: Sprite {
                color: Color::srgb(0.8, 0.3, 0.3),
                custom_size: Some(Vec2::splat(HOSTILE_SIZE)),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 1.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::circle(HOSTILE_SIZE * 0.5),
            collision_layers: CollisionLayers::new(
                GameLayer::Hostile,
                [
                    GameLayer::Wall,
                    GameLayer::Door,
                    GameLayer::Obstacle,
                    GameLayer::Player,
                    GameLayer::Hostile,
                ],
            ),
            velocity: LinearVelocity::default(),
            damping: LinearDamping(5.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}
