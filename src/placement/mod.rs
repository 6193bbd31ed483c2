//! Placement domain: rejection sampling of unobstructed points inside a room.

mod blockers;
mod sampler;

#[cfg(test)]
mod tests;

pub use blockers::{PlacementBlockers, SpatialBlockers, circle_overlaps_rect};
pub use sampler::{PlacementRng, PlacementSpec, sample_clear_point, shrink_region};

use bevy::prelude::*;

use crate::core::{GameState, RunConfig};

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementRng>()
            .add_systems(OnEnter(GameState::Run), seed_placement_rng);
    }
}

fn seed_placement_rng(run_config: Res<RunConfig>, mut rng: ResMut<PlacementRng>) {
    *rng = PlacementRng::from_seed(run_config.seed);
    debug!("[PLACEMENT] Seeded placement rng with {}", run_config.seed);
}
