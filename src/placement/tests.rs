//! Placement domain: tests for the rejection sampler and blocker overlap.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{
    PlacementBlockers, PlacementSpec, circle_overlaps_rect, sample_clear_point, shrink_region,
};

fn room() -> Rect {
    Rect::new(-200.0, -150.0, 200.0, 150.0)
}

// -----------------------------------------------------------------------------
// Region shrinking
// -----------------------------------------------------------------------------

#[test]
fn test_shrink_region_applies_margin_on_every_side() {
    let shrunk = shrink_region(room(), 20.0).unwrap();
    assert_eq!(shrunk.min, Vec2::new(-180.0, -130.0));
    assert_eq!(shrunk.max, Vec2::new(180.0, 130.0));
}

#[test]
fn test_shrink_region_rejects_swallowed_region() {
    assert!(shrink_region(Rect::new(0.0, 0.0, 30.0, 300.0), 20.0).is_none());
}

// -----------------------------------------------------------------------------
// Overlap test
// -----------------------------------------------------------------------------

#[test]
fn test_circle_overlaps_rect_cases() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(circle_overlaps_rect(Vec2::new(5.0, 5.0), 1.0, rect));
    assert!(circle_overlaps_rect(Vec2::new(12.0, 5.0), 2.5, rect));
    assert!(!circle_overlaps_rect(Vec2::new(12.0, 5.0), 1.5, rect));
    // Corner distance is sqrt(2) * 3 ~= 4.24
    assert!(!circle_overlaps_rect(Vec2::new(13.0, 13.0), 4.0, rect));
    assert!(circle_overlaps_rect(Vec2::new(13.0, 13.0), 4.5, rect));
}

// -----------------------------------------------------------------------------
// Sampler
// -----------------------------------------------------------------------------

#[test]
fn test_sampled_points_respect_margin_and_clearance() {
    let blockers = vec![
        Rect::new(-200.0, -20.0, 100.0, 20.0),
        Rect::new(40.0, 60.0, 120.0, 150.0),
        Rect::new(-150.0, -150.0, -60.0, -80.0),
    ];
    let spec = PlacementSpec {
        margin: 25.0,
        clearance: 12.0,
        max_attempts: 40,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let inner = shrink_region(room(), spec.margin).unwrap();

    let mut found = 0;
    for _ in 0..300 {
        if let Some(point) = sample_clear_point(room(), &spec, &blockers, &mut rng) {
            found += 1;
            assert!(inner.contains(point), "{point:?} escaped the margin");
            assert!(!blockers.is_blocked(point, spec.clearance));
        }
    }
    assert!(found > 0, "an open room should yield at least one point");
}

#[test]
fn test_sampler_gives_up_when_region_is_fully_blocked() {
    let blockers = vec![Rect::new(-300.0, -300.0, 300.0, 300.0)];
    let spec = PlacementSpec::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    assert!(sample_clear_point(room(), &spec, &blockers, &mut rng).is_none());
}

#[test]
fn test_sampler_with_zero_attempts_never_places() {
    let spec = PlacementSpec {
        max_attempts: 0,
        ..default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let blockers: Vec<Rect> = Vec::new();

    assert!(sample_clear_point(room(), &spec, &blockers, &mut rng).is_none());
}

#[test]
fn test_sampler_handles_degenerate_region() {
    let spec = PlacementSpec {
        margin: 500.0,
        ..default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let blockers: Vec<Rect> = Vec::new();

    assert!(sample_clear_point(room(), &spec, &blockers, &mut rng).is_none());
}
