//! Placement domain: blocker sets the sampler tests candidates against.

use avian2d::prelude::*;
use bevy::prelude::*;

/// A read-only set of static obstacles.
pub trait PlacementBlockers {
    /// True when a disc of `radius` at `center` overlaps any blocker.
    fn is_blocked(&self, center: Vec2, radius: f32) -> bool;
}

/// Disc vs axis-aligned rectangle overlap (touching counts as overlap).
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: Rect) -> bool {
    let closest = center.clamp(rect.min, rect.max);
    closest.distance_squared(center) <= radius * radius
}

impl PlacementBlockers for [Rect] {
    fn is_blocked(&self, center: Vec2, radius: f32) -> bool {
        self.iter()
            .any(|rect| circle_overlaps_rect(center, radius, *rect))
    }
}

impl PlacementBlockers for Vec<Rect> {
    fn is_blocked(&self, center: Vec2, radius: f32) -> bool {
        self.as_slice().is_blocked(center, radius)
    }
}

/// Blockers backed by the physics world, filtered by collision layer.
pub struct SpatialBlockers<'a, 'w, 's> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    pub filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialBlockers<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, filter: SpatialQueryFilter) -> Self {
        Self {
            spatial_query,
            filter,
        }
    }
}

impl PlacementBlockers for SpatialBlockers<'_, '_, '_> {
    fn is_blocked(&self, center: Vec2, radius: f32) -> bool {
        let footprint = Collider::circle(radius);
        !self
            .spatial_query
            .shape_intersections(&footprint, center, 0.0, &self.filter)
            .is_empty()
    }
}
