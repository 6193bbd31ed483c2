//! Doors domain: three-state doors and the proximity sensors that drive them.

mod components;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{CloseCheck, Door, DoorState, ProximitySensor};

use bevy::prelude::*;

use crate::core::GameState;
use crate::doors::systems::{sync_door_state, tick_proximity_sensors, track_proximity_sensors};
use crate::rooms::RoomSet;

pub struct DoorsPlugin;

impl Plugin for DoorsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            track_proximity_sensors
                .in_set(RoomSet::Detect)
                .run_if(in_state(GameState::Run)),
        )
        .add_systems(
            Update,
            tick_proximity_sensors
                .in_set(RoomSet::Activities)
                .run_if(in_state(GameState::Run)),
        )
        .add_systems(
            Update,
            sync_door_state
                .in_set(RoomSet::Cosmetic)
                .run_if(in_state(GameState::Run)),
        );
    }
}
