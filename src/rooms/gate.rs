//! Rooms domain: the AND-gate that holds a room's doors shut.

use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::activities::ActivityKind;

/// Named precondition a gate can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GateCondition {
    NpcTalked,
    CombatCleared,
    PuzzleCleared,
    LevelCompleted,
}

impl GateCondition {
    pub const ALL: [GateCondition; 4] = [
        GateCondition::NpcTalked,
        GateCondition::CombatCleared,
        GateCondition::PuzzleCleared,
        GateCondition::LevelCompleted,
    ];

    /// Condition satisfied when an activity of `kind` completes
    pub fn for_activity(kind: ActivityKind) -> Self {
        if kind.is_puzzle() {
            GateCondition::PuzzleCleared
        } else {
            GateCondition::CombatCleared
        }
    }
}

/// Which conditions a room's gate waits on. Everything defaults to ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GateRequirements {
    pub require_npc_talked: bool,
    /// NPC whose dialogue satisfies `NpcTalked`
    pub npc_id: Option<String>,
    pub require_combat_cleared: bool,
    pub require_puzzle_cleared: bool,
    pub require_level_completed: bool,
}

impl GateRequirements {
    pub fn requires(&self, condition: GateCondition) -> bool {
        match condition {
            GateCondition::NpcTalked => self.require_npc_talked,
            GateCondition::CombatCleared => self.require_combat_cleared,
            GateCondition::PuzzleCleared => self.require_puzzle_cleared,
            GateCondition::LevelCompleted => self.require_level_completed,
        }
    }

    pub fn required(&self) -> impl Iterator<Item = GateCondition> + '_ {
        GateCondition::ALL
            .into_iter()
            .filter(|condition| self.requires(*condition))
    }
}

/// Outcome of a `mark_satisfied` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateUpdate {
    /// Some required condition is still missing
    Pending,
    /// This call solved the gate; the caller drives the doors open
    Opened,
    /// The gate was solved earlier; nothing changed
    AlreadyOpen,
}

/// Lives on the room entity. `solved` flips false -> true once and never back.
#[derive(Component, Debug, Clone, Default)]
pub struct Gate {
    requirements: GateRequirements,
    satisfied: HashSet<GateCondition>,
    solved: bool,
}

impl Gate {
    pub fn new(requirements: GateRequirements) -> Self {
        Self {
            requirements,
            satisfied: HashSet::new(),
            solved: false,
        }
    }

    pub fn requirements(&self) -> &GateRequirements {
        &self.requirements
    }

    pub fn npc_id(&self) -> Option<&str> {
        self.requirements.npc_id.as_deref()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_satisfied(&self, condition: GateCondition) -> bool {
        self.satisfied.contains(&condition)
    }

    /// Conditions the gate waits on. With nothing toggled it waits for the level.
    pub fn required(&self) -> Vec<GateCondition> {
        let required: Vec<GateCondition> = self.requirements.required().collect();
        if required.is_empty() {
            return vec![GateCondition::LevelCompleted];
        }
        required
    }

    /// Required conditions not yet satisfied
    pub fn missing(&self) -> Vec<GateCondition> {
        self.required()
            .into_iter()
            .filter(|condition| !self.satisfied.contains(condition))
            .collect()
    }

    /// Idempotent. Re-evaluates the AND over required conditions after every call.
    pub fn mark_satisfied(&mut self, condition: GateCondition) -> GateUpdate {
        if self.solved {
            return GateUpdate::AlreadyOpen;
        }

        self.satisfied.insert(condition);
        if self.missing().is_empty() {
            self.solved = true;
            return GateUpdate::Opened;
        }
        GateUpdate::Pending
    }
}
