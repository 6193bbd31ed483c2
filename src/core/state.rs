//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content is loaded and validated here
    #[default]
    Boot,
    /// Rooms are live and ticking
    Run,
}
