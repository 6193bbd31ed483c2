//! Validation for room definitions and gameplay defaults. Issues are diagnostics, never fatal.

use std::collections::HashSet;

use super::data::*;
use super::registry::RoomCatalog;

/// A validation issue with context about where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// "Room '<id>'" or "Gameplay defaults"
    pub source: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} field '{}': {}",
            self.source, self.field, self.message
        )
    }
}

/// Helper macro for recording an issue against a room
macro_rules! issue {
    ($issues:expr, $room:expr, $field:expr, $($arg:tt)*) => {
        $issues.push(ValidationIssue {
            source: format!("Room '{}'", $room.id),
            field: $field,
            message: format!($($arg)*),
        })
    };
}

/// Validate every room in the catalog.
/// Returns a list of issues, empty if all rooms look playable.
pub fn validate_rooms(catalog: &RoomCatalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let npc_ids: HashSet<&str> = catalog
        .iter()
        .flat_map(|room| room.npcs.iter().map(|npc| npc.id.as_str()))
        .collect();

    for room in catalog.iter() {
        if room.size.0 <= 0.0 || room.size.1 <= 0.0 {
            issue!(issues, room, "size", "room has no interior ({:?})", room.size);
        }
        if room.doors.is_empty() {
            issue!(issues, room, "doors", "room has no doors to seal");
        }

        validate_gate(room, &npc_ids, &mut issues);

        for activity in &room.activities {
            validate_activity(room, activity, &mut issues);
        }
    }

    issues
}

fn validate_gate(room: &RoomDef, npc_ids: &HashSet<&str>, issues: &mut Vec<ValidationIssue>) {
    let gate = &room.gate;

    if gate.require_npc_talked {
        match gate.npc_id.as_deref() {
            None => issue!(
                issues,
                room,
                "gate.npc_id",
                "npc talk is required but no npc id is set"
            ),
            Some(id) if !npc_ids.contains(id) => issue!(
                issues,
                room,
                "gate.npc_id",
                "npc '{}' does not exist in any room",
                id
            ),
            Some(_) => {}
        }
    }

    let has_combat = room
        .activities
        .iter()
        .any(|activity| !activity.kind().is_puzzle());
    let has_puzzle = room
        .activities
        .iter()
        .any(|activity| activity.kind().is_puzzle());

    if gate.require_combat_cleared && !has_combat {
        issue!(
            issues,
            room,
            "gate.require_combat_cleared",
            "combat clear is required but the room has no hostiles"
        );
    }
    if gate.require_puzzle_cleared && !has_puzzle {
        issue!(
            issues,
            room,
            "gate.require_puzzle_cleared",
            "puzzle clear is required but the room has no puzzle"
        );
    }
}

fn validate_activity(room: &RoomDef, activity: &ActivityDef, issues: &mut Vec<ValidationIssue>) {
    match activity {
        ActivityDef::Waves {
            initial_count,
            wave_size,
            max_total,
            ..
        } => {
            if *max_total == 0 {
                issue!(issues, room, "waves.max_total", "max_total is zero");
            } else if *wave_size == 0 && initial_count < max_total {
                issue!(
                    issues,
                    room,
                    "waves.wave_size",
                    "wave_size is zero so max_total {} is unreachable",
                    max_total
                );
            }
        }
        ActivityDef::Guards { positions } => {
            if positions.is_empty() {
                issue!(issues, room, "guards.positions", "no guard positions");
            }
        }
        ActivityDef::Sequence { sequences, pads } => {
            if pads.is_empty() {
                issue!(issues, room, "sequence.pads", "no input pads");
            }
            let Some(first) = sequences.first() else {
                issue!(issues, room, "sequence.sequences", "no sequences");
                return;
            };
            for (index, sequence) in sequences.iter().enumerate() {
                if sequence.is_empty() {
                    issue!(issues, room, "sequence.sequences", "sequence {} is empty", index);
                }
                if sequence.len() != first.len() {
                    issue!(
                        issues,
                        room,
                        "sequence.sequences",
                        "sequence {} has {} steps, expected {}",
                        index,
                        sequence.len(),
                        first.len()
                    );
                }
                if let Some(symbol) = sequence.iter().find(|s| usize::from(**s) >= pads.len()) {
                    issue!(
                        issues,
                        room,
                        "sequence.sequences",
                        "sequence {} uses pad {} but only {} pads exist",
                        index,
                        symbol,
                        pads.len()
                    );
                }
            }
        }
        ActivityDef::Lanterns {
            count, lifetime, ..
        } => {
            if *count == 0 {
                issue!(issues, room, "lanterns.count", "zero lantern targets");
            }
            if *lifetime <= 0.0 {
                issue!(issues, room, "lanterns.lifetime", "lifetime must be positive");
            }
        }
        ActivityDef::Plates { plates, blocks, .. } => {
            if plates.is_empty() {
                issue!(issues, room, "plates.plates", "zero pressure plates");
            }
            if blocks.len() < plates.len() {
                issue!(
                    issues,
                    room,
                    "plates.blocks",
                    "{} blocks cannot hold down {} plates",
                    blocks.len(),
                    plates.len()
                );
            }
        }
    }
}

/// Validate gameplay tunables. Timers reject negative durations, so every
/// duration here must be non-negative and every interval positive.
pub fn validate_defaults(defaults: &GameplayDefaults) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut check = |field: &'static str, value: f32, allow_zero: bool| {
        let bad = if allow_zero { value < 0.0 } else { value <= 0.0 };
        if !bad {
            return;
        }
        let expected = if allow_zero { "non-negative" } else { "positive" };
        issues.push(ValidationIssue {
            source: "Gameplay defaults".to_string(),
            field,
            message: format!("{} must be {}", value, expected),
        });
    };

    check("placement.clearance", defaults.placement.clearance, true);
    check("placement.margin", defaults.placement.margin, true);
    check("doors.close_delay", defaults.doors.close_delay, true);
    check("doors.thickness", defaults.doors.thickness, false);

    check("waves.poll_interval", defaults.waves.poll_interval, false);
    check("waves.spawn_settle", defaults.waves.spawn_settle, true);
    check("waves.hostile_health", defaults.waves.hostile_health, false);

    let sequence = &defaults.sequence;
    check("sequence.lead_in", sequence.lead_in, true);
    check("sequence.show_step", sequence.show_step, true);
    check("sequence.step_gap", sequence.step_gap, true);
    check("sequence.advance_delay", sequence.advance_delay, true);
    check("sequence.retry_delay", sequence.retry_delay, true);
    check("sequence.press_flash", sequence.press_flash, true);

    check("lanterns.blink_duration", defaults.lanterns.blink_duration, true);
    check("lanterns.blink_interval", defaults.lanterns.blink_interval, false);
    check("lanterns.interact_radius", defaults.lanterns.interact_radius, true);

    check("blocks.size", defaults.blocks.size, false);
    check("blocks.tile_size", defaults.blocks.tile_size, false);
    check("blocks.slide_seconds", defaults.blocks.slide_seconds, true);

    issues
}
