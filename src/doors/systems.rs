//! Doors domain: proximity sensing and collider/sprite sync.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::Health;
use crate::doors::components::{CloseCheck, Door, DoorState, ProximitySensor};
use crate::movement::GameLayer;

/// Tracks the player entering and leaving door proximity sensors
pub(crate) fn track_proximity_sensors(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut collision_end_events: MessageReader<CollisionEnd>,
    mut sensor_query: Query<&mut ProximitySensor>,
    mut door_query: Query<&mut Door>,
    health_query: Query<&Health>,
) {
    let is_player = |entity: Entity| health_query.get(entity).is_ok_and(|h| h.is_player);

    for event in collision_start_events.read() {
        let (sensor_entity, other) = if sensor_query.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if sensor_query.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if !is_player(other) {
            continue;
        }

        let Ok(mut sensor) = sensor_query.get_mut(sensor_entity) else {
            continue;
        };
        let Ok(mut door) = door_query.get_mut(sensor.door) else {
            continue;
        };

        sensor.on_player_enter(&mut door);
        debug!("[DOOR] Player near door {:?} ({:?})", sensor.door, door.state());
    }

    for event in collision_end_events.read() {
        let (sensor_entity, other) = if sensor_query.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if sensor_query.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if !is_player(other) {
            continue;
        }

        let Ok(mut sensor) = sensor_query.get_mut(sensor_entity) else {
            continue;
        };
        let Ok(door) = door_query.get(sensor.door) else {
            continue;
        };

        sensor.on_player_exit(door);
    }
}

/// Runs pending delayed closes
pub(crate) fn tick_proximity_sensors(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut sensor_query: Query<(&mut ProximitySensor, &GlobalTransform)>,
    mut door_query: Query<&mut Door>,
) {
    let player_filter = SpatialQueryFilter::from_mask(GameLayer::Player);

    for (mut sensor, transform) in &mut sensor_query {
        if !sensor.close_pending() {
            continue;
        }
        let Ok(mut door) = door_query.get_mut(sensor.door) else {
            continue;
        };

        let center = transform.translation().truncate();
        let threshold = Collider::rectangle(sensor.threshold_size.x, sensor.threshold_size.y);
        let door_entity = sensor.door;

        let outcome = sensor.tick(time.delta(), &mut door, || {
            !spatial_query
                .shape_intersections(&threshold, center, 0.0, &player_filter)
                .is_empty()
        });

        match outcome {
            CloseCheck::Closed => debug!("[DOOR] Door {:?} closed behind player", door_entity),
            CloseCheck::AbortedLocked | CloseCheck::AbortedOccupied => {
                debug!("[DOOR] Close of {:?} aborted: {:?}", door_entity, outcome)
            }
            CloseCheck::Idle | CloseCheck::Waiting => {}
        }
    }
}

/// Mirrors door state onto the blocking collider and the sprite
pub(crate) fn sync_door_state(
    mut commands: Commands,
    mut query: Query<(Entity, &Door, &mut Sprite), Changed<Door>>,
) {
    for (entity, door, mut sprite) in &mut query {
        sprite.color = door_color(door.state());

        if door.is_solid() {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

pub(crate) fn door_color(state: DoorState) -> Color {
    match state {
        DoorState::Open => Color::srgba(0.45, 0.35, 0.2, 0.25),
        DoorState::Closed => Color::srgb(0.55, 0.4, 0.25),
        DoorState::Locked => Color::srgb(0.6, 0.2, 0.2),
    }
}
