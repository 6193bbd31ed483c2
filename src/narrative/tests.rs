//! Narrative domain: tests for talked flags and NPC selection.

use bevy::prelude::Vec2;

use super::systems::nearest_in_range;
use super::*;

fn npc(id: &str) -> Npc {
    Npc {
        id: id.to_string(),
        name: id.to_string(),
        lines: vec!["...".to_string()],
    }
}

// -----------------------------------------------------------------------------
// NarrativeState tests
// -----------------------------------------------------------------------------

#[test]
fn test_mark_talked_once() {
    let mut state = NarrativeState::default();
    assert!(!state.has_talked("warden"));

    assert!(state.mark_talked("warden"));
    assert!(!state.mark_talked("warden"));
    assert!(state.has_talked("warden"));
    assert!(!state.has_talked("smith"));
    assert_eq!(state.talked_count(), 1);
}

// -----------------------------------------------------------------------------
// NPC selection tests
// -----------------------------------------------------------------------------

#[test]
fn test_nearest_npc_in_range() {
    let near = npc("near");
    let far = npc("far");
    let picked = nearest_in_range(
        Vec2::ZERO,
        50.0,
        [(&far, Vec2::new(40.0, 0.0)), (&near, Vec2::new(0.0, 10.0))],
    );
    assert_eq!(picked.map(|n| n.id.as_str()), Some("near"));
}

#[test]
fn test_no_npc_out_of_range() {
    let lonely = npc("lonely");
    let picked = nearest_in_range(Vec2::ZERO, 50.0, [(&lonely, Vec2::new(80.0, 0.0))]);
    assert!(picked.is_none());
}
