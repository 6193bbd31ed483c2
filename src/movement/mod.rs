//! Movement domain: player bootstrap and top-down locomotion.

mod bootstrap;
mod components;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{GameLayer, Obstacle, Player, Pushable, Wall};
pub use resources::{MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{apply_movement, read_input};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(OnEnter(GameState::Run), spawn_player)
            .add_systems(
                Update,
                (read_input, apply_movement)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
