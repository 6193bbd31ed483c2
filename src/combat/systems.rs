//! Combat domain: damage, death, and the player's strike.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Health, Hittable, Hostile, Striker};
use crate::combat::events::{DamageEvent, DeathEvent, TargetHitEvent};
use crate::movement::Player;

/// Space strikes every hostile and hittable target within reach
pub(crate) fn player_strike(
    keyboard: Res<ButtonInput<KeyCode>>,
    player_query: Query<(Entity, &Transform, &Striker), With<Player>>,
    hostile_query: Query<(Entity, &Transform), With<Hostile>>,
    target_query: Query<(Entity, &Transform), With<Hittable>>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut hit_events: MessageWriter<TargetHitEvent>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }

    let Ok((player, player_transform, striker)) = player_query.single() else {
        return;
    };
    let origin = player_transform.translation.truncate();

    for (entity, transform) in &hostile_query {
        if transform.translation.truncate().distance(origin) <= striker.reach {
            damage_events.write(DamageEvent {
                source: player,
                target: entity,
                amount: striker.damage,
            });
        }
    }

    for (entity, transform) in &target_query {
        if transform.translation.truncate().distance(origin) <= striker.reach {
            hit_events.write(TargetHitEvent {
                target: entity,
                source: player,
            });
        }
    }
}

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<&mut Health>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        health.take_damage(event.amount);

        if !health.is_alive() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}

/// Dead hostiles are despawned; wave spawners observe this as a liveness drop
pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    hostile_query: Query<Entity, With<Hostile>>,
) {
    for event in death_events.read() {
        if let Ok(entity) = hostile_query.get(event.entity) {
            debug!("[COMBAT] Hostile {:?} died", entity);
            commands.entity(entity).despawn();
        }
    }
}
