//! Core domain: core run flow systems and setup.

use bevy::prelude::*;

use crate::core::resources::RunConfig;
use crate::core::state::GameState;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Leave Boot once startup loading has run
pub(crate) fn enter_run(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}

pub(crate) fn log_run_start(run_config: Res<RunConfig>) {
    info!("Starting run with seed: {}", run_config.seed);
}
