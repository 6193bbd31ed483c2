//! Debug domain: serializable snapshots of room progress.

use serde::Serialize;

use crate::activities::{Activity, ActivityKind, Lifecycle, SpawnBudget};
use crate::rooms::{EncounterPhase, Gate, GateCondition};

#[derive(Debug, Clone, Serialize)]
pub struct ActivityStatus {
    pub kind: ActivityKind,
    pub lifecycle: Lifecycle,
    /// Wave spawners only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<SpawnBudget>,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomStatus {
    pub id: String,
    pub phase: EncounterPhase,
    pub gate_solved: bool,
    pub missing: Vec<GateCondition>,
    pub activities: Vec<ActivityStatus>,
}

pub fn activity_status(activity: &Activity) -> ActivityStatus {
    let (budget, detail) = match activity {
        Activity::Waves(spawner) => (
            Some(spawner.budget()),
            format!(
                "{} live, {} settling, {} waves",
                spawner.live().len(),
                spawner.pending_count(),
                spawner.waves_released()
            ),
        ),
        Activity::Guards(post) => (None, format!("{} guards standing", post.roster().len())),
        Activity::Sequence(puzzle) => (
            None,
            format!(
                "sequence {}/{}, input {:?}",
                puzzle.cursor(),
                puzzle.sequence_count(),
                puzzle.input()
            ),
        ),
        Activity::Lanterns(puzzle) => (
            None,
            format!(
                "attempt {}, {}/{} lit",
                puzzle.attempt(),
                puzzle.lit_count(),
                puzzle.targets().len()
            ),
        ),
        Activity::Plates(puzzle) => (
            None,
            format!(
                "{}/{} plates pressed",
                puzzle.pressed_count(),
                puzzle.plates().len()
            ),
        ),
        Activity::Inert(inert) => (None, format!("inert: {}", inert.reason)),
    };

    ActivityStatus {
        kind: activity.kind(),
        lifecycle: activity.lifecycle(),
        budget,
        detail,
    }
}

pub fn room_status<'a>(
    id: &str,
    phase: EncounterPhase,
    gate: &Gate,
    activities: impl IntoIterator<Item = &'a Activity>,
) -> RoomStatus {
    RoomStatus {
        id: id.to_string(),
        phase,
        gate_solved: gate.is_solved(),
        missing: if gate.is_solved() {
            Vec::new()
        } else {
            gate.missing()
        },
        activities: activities.into_iter().map(activity_status).collect(),
    }
}

/// One line per room for the on-screen overlay
pub fn format_overlay(statuses: &[RoomStatus]) -> String {
    statuses
        .iter()
        .map(|status| {
            let gate = if status.gate_solved {
                "open".to_string()
            } else {
                format!("waiting {:?}", status.missing)
            };
            let activities: Vec<String> = status
                .activities
                .iter()
                .map(|a| format!("{:?} {:?} ({})", a.kind, a.lifecycle, a.detail))
                .collect();
            format!(
                "{} [{:?}] gate {} | {}",
                status.id,
                status.phase,
                gate,
                activities.join("; ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
