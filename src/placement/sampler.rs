//! Placement domain: bounded rejection sampling inside a margin-shrunk rectangle.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::placement::blockers::PlacementBlockers;

/// Tunables for one placement search.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PlacementSpec {
    /// Inward margin applied to every side of the region
    pub margin: f32,
    /// Radius of the disc that must stay clear of blockers
    pub clearance: f32,
    /// Upper bound on candidate draws before giving up
    pub max_attempts: u32,
}

impl Default for PlacementSpec {
    fn default() -> Self {
        Self {
            margin: 16.0,
            clearance: 10.0,
            max_attempts: 25,
        }
    }
}

/// Seeded RNG shared by every sampler call in a run.
#[derive(Resource, Debug)]
pub struct PlacementRng(pub ChaCha8Rng);

impl Default for PlacementRng {
    fn default() -> Self {
        Self::from_seed(rand::random())
    }
}

impl PlacementRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Shrink `region` by `margin` on every side.
/// Returns None when the margin swallows the region on either axis.
pub fn shrink_region(region: Rect, margin: f32) -> Option<Rect> {
    let min = region.min + Vec2::splat(margin);
    let max = region.max - Vec2::splat(margin);
    if min.x > max.x || min.y > max.y {
        return None;
    }
    Some(Rect::from_corners(min, max))
}

/// Draw up to `spec.max_attempts` uniform points in the shrunk region and return
/// the first whose clearance disc overlaps no blocker.
///
/// Exhaustion is an expected outcome under crowding: callers skip this attempt
/// and retry on their own schedule.
pub fn sample_clear_point<B, R>(
    region: Rect,
    spec: &PlacementSpec,
    blockers: &B,
    rng: &mut R,
) -> Option<Vec2>
where
    B: PlacementBlockers + ?Sized,
    R: Rng + ?Sized,
{
    let area = shrink_region(region, spec.margin)?;

    for _ in 0..spec.max_attempts {
        let candidate = Vec2::new(
            rng.random_range(area.min.x..=area.max.x),
            rng.random_range(area.min.y..=area.max.y),
        );

        if !blockers.is_blocked(candidate, spec.clearance) {
            return Some(candidate);
        }
    }

    None
}
