//! Activities domain: shared timing and interaction tunables.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::lanterns::LanternTiming;
use super::sequence::SequenceTiming;
use super::waves::WaveTiming;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BlockTuning {
    pub size: f32,
    /// Distance of one push step
    pub tile_size: f32,
    pub slide_seconds: f32,
}

impl Default for BlockTuning {
    fn default() -> Self {
        Self {
            size: 28.0,
            tile_size: 32.0,
            slide_seconds: 0.15,
        }
    }
}

/// Installed by the content loader from gameplay defaults.
#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivityTuning {
    pub waves: WaveTiming,
    pub sequence: SequenceTiming,
    pub lanterns: LanternTiming,
    pub blocks: BlockTuning,
}
