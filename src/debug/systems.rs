//! Debug domain: hotkeys and the room status overlay.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::activities::Activity;
use crate::combat::{DamageEvent, Health, Hostile};
use crate::debug::state::DebugState;
use crate::debug::status::{RoomStatus, format_overlay, room_status};
use crate::debug::ui::{DebugOverlay, spawn_debug_overlay};
use crate::movement::Player;
use crate::rooms::{Gate, Room, RoomActivities, RoomEncounter};

type RoomStatusQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Room,
        &'static RoomEncounter,
        &'static Gate,
        Option<&'static RoomActivities>,
    ),
>;

fn collect_statuses(
    room_query: &RoomStatusQuery,
    activity_query: &Query<&Activity>,
) -> Vec<RoomStatus> {
    room_query
        .iter()
        .map(|(room, encounter, gate, activities)| {
            room_status(
                &room.id,
                encounter.phase(),
                gate,
                activities
                    .into_iter()
                    .flat_map(|a| a.iter())
                    .filter_map(|entity| activity_query.get(*entity).ok()),
            )
        })
        .collect()
}

/// Handle keyboard shortcuts for debug actions (Ctrl held)
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    player_query: Query<Entity, With<Player>>,
    hostile_query: Query<(Entity, &Health), With<Hostile>>,
    room_query: RoomStatusQuery,
    activity_query: Query<&Activity>,
    existing_overlay: Query<Entity, With<DebugOverlay>>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+K: Kill every hostile
    if keyboard.just_pressed(KeyCode::KeyK) {
        let Ok(player) = player_query.single() else {
            return;
        };
        let mut killed = 0;
        for (entity, health) in &hostile_query {
            damage_events.write(DamageEvent {
                source: player,
                target: entity,
                amount: health.max,
            });
            killed += 1;
        }
        debug_state.set_message(format!("Killed {} hostiles", killed), 2.0);
        info!("[DEBUG] Killed {} hostiles", killed);
    }

    // Ctrl+J: Dump room status as JSON
    if keyboard.just_pressed(KeyCode::KeyJ) {
        let statuses = collect_statuses(&room_query, &activity_query);
        match serde_json::to_string_pretty(&statuses) {
            Ok(json) => info!("[DEBUG] Room status:\n{}", json),
            Err(e) => warn!("[DEBUG] Failed to serialize room status: {}", e),
        }
        debug_state.set_message("Room status dumped to log", 2.0);
    }

    // Ctrl+D: Toggle room overlay
    if keyboard.just_pressed(KeyCode::KeyD) {
        debug_state.show_overlay = !debug_state.show_overlay;
        if debug_state.show_overlay {
            spawn_debug_overlay(&mut commands);
        } else {
            for entity in &existing_overlay {
                commands.entity(entity).despawn();
            }
        }
        let msg = if debug_state.show_overlay {
            "Room overlay ON"
        } else {
            "Room overlay OFF"
        };
        info!("[DEBUG] {}", msg);
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    debug_state.tick_message(time.delta_secs());
}

pub(crate) fn update_debug_overlay(
    debug_state: Res<DebugState>,
    room_query: RoomStatusQuery,
    activity_query: Query<&Activity>,
    mut overlay_query: Query<&mut Text, With<DebugOverlay>>,
) {
    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };

    let mut body = format_overlay(&collect_statuses(&room_query, &activity_query));
    if let Some((message, _)) = &debug_state.status_message {
        body.push_str("\n> ");
        body.push_str(message);
    }
    **text = body;
}
