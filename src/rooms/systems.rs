//! Rooms domain: the orchestrator that starts encounters and forwards
//! activity completions to each room's gate.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::activities::{Activity, ActivityCompletedEvent, RelockDoorsRequest};
use crate::combat::Health;
use crate::doors::Door;
use crate::narrative::{NarrativeState, NpcTalkedEvent};
use crate::rooms::components::{Room, RoomEncounter};
use crate::rooms::events::{
    EncounterStartedEvent, GateOpenedEvent, PlayerEnteredRoomEvent, RoomClearedEvent,
};
use crate::rooms::gate::{Gate, GateCondition, GateUpdate};
use crate::rooms::relationships::{RoomActivities, RoomDoors};

/// Mark a gate condition and, if that solved the gate, unlock and open every door
fn mark_gate(
    room: Entity,
    room_id: &str,
    gate: &mut Gate,
    condition: GateCondition,
    doors: Option<&RoomDoors>,
    door_query: &mut Query<&mut Door>,
    opened_events: &mut MessageWriter<GateOpenedEvent>,
) {
    match gate.mark_satisfied(condition) {
        GateUpdate::AlreadyOpen => {}
        GateUpdate::Pending => debug!(
            "[GATE] Room '{}' satisfied {:?}, still waiting on {:?}",
            room_id,
            condition,
            gate.missing()
        ),
        GateUpdate::Opened => {
            for door_entity in doors.into_iter().flat_map(|doors| doors.iter()) {
                let Ok(mut door) = door_query.get_mut(*door_entity) else {
                    continue;
                };
                door.unlock();
                door.open();
            }
            info!("[GATE] Room '{}' opened by {:?}", room_id, condition);
            opened_events.write(GateOpenedEvent {
                room,
                room_id: room_id.to_string(),
            });
        }
    }
}

fn lock_doors(doors: Option<&RoomDoors>, door_query: &mut Query<&mut Door>) -> usize {
    let mut locked = 0;
    for door_entity in doors.into_iter().flat_map(|doors| doors.iter()) {
        let Ok(mut door) = door_query.get_mut(*door_entity) else {
            continue;
        };
        if door.lock() {
            locked += 1;
        }
    }
    locked
}

// ============================================================
// Detect
// ============================================================

/// Turns trigger contact by the player into `PlayerEnteredRoomEvent`
pub(crate) fn detect_room_entry(
    mut collision_start_events: MessageReader<CollisionStart>,
    health_query: Query<&Health>,
    room_query: Query<(), With<Room>>,
    mut entered_events: MessageWriter<PlayerEnteredRoomEvent>,
) {
    let is_player = |entity: Entity| health_query.get(entity).is_ok_and(|h| h.is_player);

    for event in collision_start_events.read() {
        let (room, other) = if room_query.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if room_query.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };
        if is_player(other) {
            entered_events.write(PlayerEnteredRoomEvent { room });
        }
    }
}

/// First entry seals the room and starts its activities; re-entry is ignored
pub(crate) fn start_encounters(
    mut entered_events: MessageReader<PlayerEnteredRoomEvent>,
    narrative: Res<NarrativeState>,
    mut room_query: Query<(
        &Room,
        &mut RoomEncounter,
        &mut Gate,
        Option<&RoomDoors>,
        Option<&RoomActivities>,
    )>,
    mut activity_query: Query<&mut Activity>,
    mut door_query: Query<&mut Door>,
    mut started_events: MessageWriter<EncounterStartedEvent>,
    mut opened_events: MessageWriter<GateOpenedEvent>,
) {
    for event in entered_events.read() {
        let Ok((room, mut encounter, mut gate, doors, activities)) =
            room_query.get_mut(event.room)
        else {
            continue;
        };
        if !encounter.activate() {
            continue;
        }

        // Dialogue held before entry counts at once
        let talked = gate.requirements().require_npc_talked
            && gate.npc_id().is_some_and(|id| narrative.has_talked(id));
        if talked {
            mark_gate(
                event.room,
                &room.id,
                &mut gate,
                GateCondition::NpcTalked,
                doors,
                &mut door_query,
                &mut opened_events,
            );
        }

        // A solved gate never reseals
        let locked = if gate.is_solved() {
            0
        } else {
            lock_doors(doors, &mut door_query)
        };

        let mut started = 0;
        for activity_entity in activities.into_iter().flat_map(|a| a.iter()) {
            let Ok(mut activity) = activity_query.get_mut(*activity_entity) else {
                continue;
            };
            if activity.start() {
                started += 1;
            }
        }

        info!(
            "[ROOM] Entered '{}': locked {} doors, started {} activities",
            room.id, locked, started
        );
        started_events.write(EncounterStartedEvent {
            room: event.room,
            room_id: room.id.clone(),
        });
    }
}

// ============================================================
// Resolve
// ============================================================

pub(crate) fn apply_npc_talk(
    mut talked_events: MessageReader<NpcTalkedEvent>,
    mut room_query: Query<(Entity, &Room, &mut Gate, Option<&RoomDoors>)>,
    mut door_query: Query<&mut Door>,
    mut opened_events: MessageWriter<GateOpenedEvent>,
) {
    for event in talked_events.read() {
        for (room_entity, room, mut gate, doors) in &mut room_query {
            let wants_npc = gate.requirements().require_npc_talked
                && gate.npc_id() == Some(event.npc_id.as_str());
            if !wants_npc {
                continue;
            }
            mark_gate(
                room_entity,
                &room.id,
                &mut gate,
                GateCondition::NpcTalked,
                doors,
                &mut door_query,
                &mut opened_events,
            );
        }
    }
}

/// True once every activity feeding `condition` has completed
pub(crate) fn condition_cleared<'a>(
    condition: GateCondition,
    activities: impl IntoIterator<Item = &'a Activity>,
) -> bool {
    activities
        .into_iter()
        .filter(|activity| GateCondition::for_activity(activity.kind()) == condition)
        .all(Activity::is_completed)
}

/// A completion marks its gate condition only when no sibling activity of
/// the same category is still running
pub(crate) fn apply_activity_completions(
    mut completed_events: MessageReader<ActivityCompletedEvent>,
    mut room_query: Query<(&Room, &mut Gate, Option<&RoomDoors>, Option<&RoomActivities>)>,
    activity_query: Query<&Activity>,
    mut door_query: Query<&mut Door>,
    mut opened_events: MessageWriter<GateOpenedEvent>,
) {
    for event in completed_events.read() {
        let Ok((room, mut gate, doors, activities)) = room_query.get_mut(event.room) else {
            continue;
        };
        info!("[ROOM] '{}' {:?} activity completed", room.id, event.kind);

        let condition = GateCondition::for_activity(event.kind);
        let siblings = activities
            .into_iter()
            .flat_map(|a| a.iter())
            .filter_map(|entity| activity_query.get(*entity).ok());
        if !condition_cleared(condition, siblings) {
            debug!(
                "[ROOM] '{}' still has {:?} activities running",
                room.id, condition
            );
            continue;
        }

        mark_gate(
            event.room,
            &room.id,
            &mut gate,
            condition,
            doors,
            &mut door_query,
            &mut opened_events,
        );
    }
}

/// Plate puzzles ask for a relock while a plate is up; honored only before
/// the gate opens and while the asking activity is unfinished
pub(crate) fn apply_relock_requests(
    mut relock_requests: MessageReader<RelockDoorsRequest>,
    room_query: Query<(&Room, &RoomEncounter, &Gate, Option<&RoomDoors>)>,
    activity_query: Query<&Activity>,
    mut door_query: Query<&mut Door>,
) {
    for request in relock_requests.read() {
        let Ok((room, encounter, gate, doors)) = room_query.get(request.room) else {
            continue;
        };
        if !encounter.is_active() || gate.is_solved() {
            continue;
        }
        let finished = activity_query
            .get(request.activity)
            .is_ok_and(|activity| activity.is_completed());
        if finished {
            continue;
        }

        let locked = lock_doors(doors, &mut door_query);
        if locked > 0 {
            debug!("[PLATES] Relocked {} doors in '{}'", locked, room.id);
        }
    }
}

/// Active rooms whose activities have all completed become Cleared
pub(crate) fn resolve_cleared_rooms(
    mut commands: Commands,
    mut room_query: Query<(
        Entity,
        &Room,
        &mut RoomEncounter,
        &mut Gate,
        Option<&RoomDoors>,
        Option<&RoomActivities>,
    )>,
    activity_query: Query<&Activity>,
    mut door_query: Query<&mut Door>,
    mut cleared_events: MessageWriter<RoomClearedEvent>,
    mut opened_events: MessageWriter<GateOpenedEvent>,
) {
    for (room_entity, room, mut encounter, mut gate, doors, activities) in &mut room_query {
        if !encounter.is_active() {
            continue;
        }
        let all_done = activities.into_iter().flat_map(|a| a.iter()).all(|entity| {
            activity_query
                .get(*entity)
                .is_ok_and(|activity| activity.is_completed())
        });
        if !all_done || !encounter.clear() {
            continue;
        }

        info!("[ROOM] '{}' cleared", room.id);
        cleared_events.write(RoomClearedEvent {
            room: room_entity,
            room_id: room.id.clone(),
        });
        commands.entity(room_entity).insert(ColliderDisabled);

        mark_gate(
            room_entity,
            &room.id,
            &mut gate,
            GateCondition::LevelCompleted,
            doors,
            &mut door_query,
            &mut opened_events,
        );
    }
}
