//! Rooms domain: events for room entry, encounter start, gate opening, and clears.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// The player crossed into a room's entry trigger
#[derive(Debug, Clone, Copy)]
pub struct PlayerEnteredRoomEvent {
    pub room: Entity,
}

impl Message for PlayerEnteredRoomEvent {}

#[derive(Debug, Clone)]
pub struct EncounterStartedEvent {
    pub room: Entity,
    pub room_id: String,
}

impl Message for EncounterStartedEvent {}

#[derive(Debug, Clone)]
pub struct GateOpenedEvent {
    pub room: Entity,
    pub room_id: String,
}

impl Message for GateOpenedEvent {}

/// Every activity of the room has completed
#[derive(Debug, Clone)]
pub struct RoomClearedEvent {
    pub room: Entity,
    pub room_id: String,
}

impl Message for RoomClearedEvent {}
