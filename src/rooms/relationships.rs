//! Rooms domain: ownership links between a room and what it drives.
//!
//! Every target uses `linked_spawn`, so despawning a room tears down its
//! activities, doors, and anything those activities spawned.

use bevy::prelude::*;

// ============================================================
// Room -> Activity
// ============================================================

/// Placed on an activity entity, pointing at its room
#[derive(Component, Debug, Clone, Copy)]
#[relationship(relationship_target = RoomActivities)]
pub struct ActivityOf(pub Entity);

#[derive(Component, Debug, Default)]
#[relationship_target(relationship = ActivityOf, linked_spawn)]
pub struct RoomActivities(Vec<Entity>);

impl RoomActivities {
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.0.iter()
    }
}

// ============================================================
// Room -> Door
// ============================================================

#[derive(Component, Debug, Clone, Copy)]
#[relationship(relationship_target = RoomDoors)]
pub struct DoorOf(pub Entity);

#[derive(Component, Debug, Default)]
#[relationship_target(relationship = DoorOf, linked_spawn)]
pub struct RoomDoors(Vec<Entity>);

impl RoomDoors {
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.0.iter()
    }
}

// ============================================================
// Activity -> spawned entity (hostiles, lanterns, pads, plates)
// ============================================================

#[derive(Component, Debug, Clone, Copy)]
#[relationship(relationship_target = ActivitySpawns)]
pub struct SpawnedBy(pub Entity);

#[derive(Component, Debug, Default)]
#[relationship_target(relationship = SpawnedBy, linked_spawn)]
pub struct ActivitySpawns(Vec<Entity>);
