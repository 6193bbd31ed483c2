//! Activities domain: wave and guard combat plus the three puzzle kinds a room can gate on.

mod components;
mod events;
mod guards;
mod lanterns;
mod plates;
mod sequence;
mod systems;
mod tuning;
mod types;
mod waves;


pub use components::{
    Activity, ActivityArena, Lantern, PressurePlate, ProgressTile, SequenceDisplay, SequencePad,
};
pub use events::{ActivityCompletedEvent, RelockDoorsRequest};
pub use guards::{GuardPhase, GuardPost};
pub use lanterns::{LanternConfig, LanternHost, LanternPuzzle, LanternTiming};
pub use plates::{PlatePuzzle, PlateVerdict};
pub use sequence::{PadResponse, ProgressMark, SequencePuzzle, SequenceTiming};
pub use tuning::{ActivityTuning, BlockTuning};
pub use types::{ActivityConfigError, ActivityKind, InertActivity, Lifecycle};
pub use waves::{HostileHost, SpawnBudget, WaveConfig, WaveSpawner, WaveTiming};

use bevy::prelude::*;

use crate::activities::systems::{
    activate_lanterns, blink_solved_lanterns, drive_guard_posts, drive_inert_activities,
    drive_lantern_puzzles, drive_plate_puzzles, drive_sequence_puzzles, drive_wave_spawners,
    flash_pressed_pads, press_sequence_pads, push_blocks, report_completions, slide_blocks,
    sync_lantern_visuals, sync_plate_visuals, sync_sequence_visuals, track_plate_weights,
};
use crate::core::GameState;
use crate::rooms::RoomSet;

pub struct ActivitiesPlugin;

impl Plugin for ActivitiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActivityTuning>()
            .add_message::<ActivityCompletedEvent>()
            .add_message::<RelockDoorsRequest>()
            .add_systems(
                Update,
                (
                    press_sequence_pads,
                    activate_lanterns,
                    track_plate_weights,
                    push_blocks,
                )
                    .in_set(RoomSet::Detect)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                (
                    drive_wave_spawners,
                    drive_guard_posts,
                    drive_sequence_puzzles,
                    drive_lantern_puzzles,
                    drive_plate_puzzles,
                    drive_inert_activities,
                    slide_blocks,
                )
                    .in_set(RoomSet::Activities)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                report_completions
                    .in_set(RoomSet::Report)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                (
                    sync_sequence_visuals,
                    flash_pressed_pads,
                    sync_plate_visuals,
                    sync_lantern_visuals,
                    blink_solved_lanterns,
                )
                    .in_set(RoomSet::Cosmetic)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
