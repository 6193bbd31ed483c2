//! Movement domain: player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Health, Striker};
use crate::movement::{GameLayer, Player};

const PLAYER_SIZE: Vec2 = Vec2::new(18.0, 24.0);

pub(crate) fn spawn_player(mut commands: Commands, existing_player: Query<Entity, With<Player>>) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    commands.spawn((
        Player,
        Health::player(6.0),
        Striker::default(),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, -100.0, 2.0),
        RigidBody::Dynamic,
        Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
        CollisionEventsEnabled,
        CollisionLayers::new(
            GameLayer::Player,
            [
                GameLayer::Wall,
                GameLayer::Obstacle,
                GameLayer::Door,
                GameLayer::Hostile,
                GameLayer::Block,
                GameLayer::Sensor,
            ],
        ),
        LinearVelocity::default(),
        LockedAxes::ROTATION_LOCKED,
        GravityScale(0.0),
    ));
}
