//! Rooms domain: room identity and the encounter state machine.

use bevy::prelude::*;
use serde::Serialize;

/// Root entity of a spawned room. Its collider is the entry trigger.
#[derive(Component, Debug, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    /// World-space interior
    pub bounds: Rect,
}

/// Idle -> Active -> Cleared, never backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EncounterPhase {
    #[default]
    Idle,
    Active,
    Cleared,
}

#[derive(Component, Debug, Clone, Default)]
pub struct RoomEncounter {
    phase: EncounterPhase,
}

impl RoomEncounter {
    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == EncounterPhase::Active
    }

    /// First player entry. Returns false on any re-entry.
    pub fn activate(&mut self) -> bool {
        if self.phase != EncounterPhase::Idle {
            return false;
        }
        self.phase = EncounterPhase::Active;
        true
    }

    /// All activities done. Returns true only on the Active -> Cleared transition.
    pub fn clear(&mut self) -> bool {
        if self.phase != EncounterPhase::Active {
            return false;
        }
        self.phase = EncounterPhase::Cleared;
        true
    }
}
