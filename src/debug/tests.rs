//! Debug domain: tests for status snapshots and messages.

use super::*;
use crate::activities::{
    Activity, ActivityConfigError, ActivityKind, InertActivity, Lifecycle, PlatePuzzle,
    WaveConfig, WaveSpawner, WaveTiming,
};
use crate::rooms::{EncounterPhase, Gate, GateCondition, GateRequirements};

fn waves() -> Activity {
    Activity::Waves(
        WaveSpawner::new(
            WaveConfig {
                initial_count: 2,
                wave_size: 3,
                max_total: 8,
                respawn_delay: 1.0,
            },
            WaveTiming::default(),
        )
        .expect("valid waves"),
    )
}

// -----------------------------------------------------------------------------
// Status snapshot tests
// -----------------------------------------------------------------------------

#[test]
fn test_room_status_lists_missing_conditions() {
    let gate = Gate::new(GateRequirements {
        require_combat_cleared: true,
        require_level_completed: true,
        ..Default::default()
    });
    let activities = [waves()];
    let status = room_status("barracks", EncounterPhase::Active, &gate, activities.iter());

    assert_eq!(status.id, "barracks");
    assert!(!status.gate_solved);
    assert_eq!(
        status.missing,
        vec![GateCondition::CombatCleared, GateCondition::LevelCompleted]
    );
    assert_eq!(status.activities.len(), 1);
    assert_eq!(status.activities[0].kind, ActivityKind::Waves);
    assert_eq!(status.activities[0].lifecycle, Lifecycle::NotStarted);
    assert_eq!(status.activities[0].budget.map(|b| b.max_total), Some(8));
}

#[test]
fn test_status_serializes_to_json() {
    let gate = Gate::new(GateRequirements::default());
    let activities = [
        Activity::Plates(PlatePuzzle::new(2, true).expect("valid plates")),
        Activity::Inert(InertActivity::new(
            ActivityKind::Lanterns,
            ActivityConfigError::NoTargets,
        )),
    ];
    let status = room_status("vault", EncounterPhase::Idle, &gate, activities.iter());

    let json = serde_json::to_value(&status).expect("status serializes");
    assert_eq!(json["id"], "vault");
    assert_eq!(json["phase"], "Idle");
    assert_eq!(json["activities"][0]["kind"], "Plates");
    assert!(json["activities"][0].get("budget").is_none());
    assert_eq!(
        json["activities"][1]["detail"],
        "inert: zero lantern targets configured"
    );
}

#[test]
fn test_overlay_line_per_room() {
    let mut open_gate = Gate::new(GateRequirements::default());
    open_gate.mark_satisfied(GateCondition::LevelCompleted);
    let closed_gate = Gate::new(GateRequirements {
        require_puzzle_cleared: true,
        ..Default::default()
    });
    let no_activities: [Activity; 0] = [];

    let text = format_overlay(&[
        room_status("a", EncounterPhase::Cleared, &open_gate, no_activities.iter()),
        room_status("b", EncounterPhase::Idle, &closed_gate, no_activities.iter()),
    ]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("a [Cleared] gate open"));
    assert!(lines[1].contains("waiting [PuzzleCleared]"));
}

// -----------------------------------------------------------------------------
// DebugState tests
// -----------------------------------------------------------------------------

#[test]
fn test_status_message_fades() {
    let mut state = DebugState::default();
    state.set_message("hello", 1.0);
    state.tick_message(0.5);
    assert!(state.status_message.is_some());
    state.tick_message(0.6);
    assert!(state.status_message.is_none());
}
