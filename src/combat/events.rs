//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// A projectile impact or interaction reached a hittable target.
/// Rooms only consume this signal; hit resolution lives elsewhere.
#[derive(Debug)]
pub struct TargetHitEvent {
    pub target: Entity,
    pub source: Entity,
}

impl Message for TargetHitEvent {}
