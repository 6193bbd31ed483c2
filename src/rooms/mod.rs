//! Rooms domain: room spawning, gates, and the encounter orchestrator.

mod components;
mod events;
mod gate;
mod relationships;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{EncounterPhase, Room, RoomEncounter};
pub use events::{
    EncounterStartedEvent, GateOpenedEvent, PlayerEnteredRoomEvent, RoomClearedEvent,
};
pub use gate::{Gate, GateCondition, GateRequirements, GateUpdate};
pub use relationships::{ActivityOf, ActivitySpawns, DoorOf, RoomActivities, RoomDoors, SpawnedBy};

use bevy::prelude::*;

use crate::core::GameState;
use crate::rooms::spawn::spawn_rooms;
use crate::rooms::systems::{
    apply_activity_completions, apply_npc_talk, apply_relock_requests, detect_room_entry,
    resolve_cleared_rooms, start_encounters,
};

/// Per-frame ordering shared by every domain that takes part in room flow
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomSet {
    /// Trigger entry, contact, and interaction input
    Detect,
    /// State machine ticks
    Activities,
    /// Finished activities write their completion event
    Report,
    /// Completions reach gates and doors move
    Resolve,
    /// Sprites follow state
    Cosmetic,
}

pub struct RoomsPlugin;

impl Plugin for RoomsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                RoomSet::Detect,
                RoomSet::Activities,
                RoomSet::Report,
                RoomSet::Resolve,
                RoomSet::Cosmetic,
            )
                .chain(),
        )
        .add_message::<PlayerEnteredRoomEvent>()
        .add_message::<EncounterStartedEvent>()
        .add_message::<GateOpenedEvent>()
        .add_message::<RoomClearedEvent>()
        .add_systems(OnEnter(GameState::Run), spawn_rooms)
        .add_systems(
            Update,
            (detect_room_entry, start_encounters)
                .chain()
                .in_set(RoomSet::Detect)
                .run_if(in_state(GameState::Run)),
        )
        .add_systems(
            Update,
            (
                apply_npc_talk,
                apply_activity_completions,
                apply_relock_requests,
                resolve_cleared_rooms,
            )
                .chain()
                .in_set(RoomSet::Resolve)
                .run_if(in_state(GameState::Run)),
        );
    }
}
