//! Narrative domain: per-NPC talked flags for the current run.

use std::collections::HashSet;

use bevy::prelude::*;

/// Which NPCs the player has talked to. Gates poll this on room entry.
#[derive(Resource, Debug, Default)]
pub struct NarrativeState {
    talked: HashSet<String>,
}

impl NarrativeState {
    /// Returns true the first time `npc_id` is marked
    pub fn mark_talked(&mut self, npc_id: &str) -> bool {
        self.talked.insert(npc_id.to_string())
    }

    pub fn has_talked(&self, npc_id: &str) -> bool {
        self.talked.contains(npc_id)
    }

    pub fn talked_count(&self) -> usize {
        self.talked.len()
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct NarrativeTuning {
    pub talk_radius: f32,
}

impl Default for NarrativeTuning {
    fn default() -> Self {
        Self { talk_radius: 56.0 }
    }
}
