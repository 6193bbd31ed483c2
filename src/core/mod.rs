//! Core domain: run state, run configuration, and shared setup.

mod resources;
mod state;
mod systems;

pub use resources::RunConfig;
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{enter_run, log_run_start, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .add_systems(Startup, setup_camera)
            .add_systems(PostStartup, enter_run)
            .add_systems(OnEnter(GameState::Run), log_run_start);
    }
}
