//! Debug domain: room progress inspection for fast iteration.
//!
//! Hotkeys (Ctrl held):
//! - K: kill every hostile
//! - J: dump room status as JSON to the log
//! - D: toggle the room status overlay

mod state;
mod status;
mod systems;
mod ui;

#[cfg(test)]
mod tests;

pub use state::DebugState;
pub use status::{ActivityStatus, RoomStatus, activity_status, format_overlay, room_status};

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::systems::{handle_debug_hotkeys, update_debug_overlay, update_status_message};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                update_status_message,
                update_debug_overlay.run_if(|state: Res<DebugState>| state.show_overlay),
            )
                .chain()
                .run_if(in_state(GameState::Run)),
        );
    }
}
