//! Core domain: shared resources for run configuration.

use bevy::prelude::*;
use rand::Rng;

/// Per-run configuration. The seed feeds every placement roll of the run.
#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}
