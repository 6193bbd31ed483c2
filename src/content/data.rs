//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The RoomCatalog provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::activities::{
    ActivityKind, ActivityTuning, BlockTuning, LanternTiming, SequenceTiming, WaveTiming,
};
use crate::placement::PlacementSpec;
use crate::rooms::GateRequirements;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Rooms (rooms.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomDef {
    pub id: String,
    pub name: String,
    pub center: (f32, f32),
    pub size: (f32, f32),
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
    #[serde(default)]
    pub doors: Vec<DoorDef>,
    #[serde(default)]
    pub gate: GateRequirements,
    #[serde(default)]
    pub activities: Vec<ActivityDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
}

impl RoomDef {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center.0, self.center.1)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }

    /// World-space rectangle inside the walls
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center(), self.size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum DoorSide {
    North,
    South,
    East,
    West,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoorDef {
    pub side: DoorSide,
    /// Offset along the wall from its midpoint
    #[serde(default)]
    pub offset: f32,
    #[serde(default = "default_door_width")]
    pub width: f32,
    #[serde(default = "default_true")]
    pub starts_open: bool,
}

fn default_door_width() -> f32 {
    56.0
}

fn default_true() -> bool {
    true
}

/// Offsets are relative to the room center
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObstacleDef {
    pub offset: (f32, f32),
    pub size: (f32, f32),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NpcDef {
    pub id: String,
    pub name: String,
    pub offset: (f32, f32),
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Guard, pad, plate, and block positions are offsets from the room center
#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum ActivityDef {
    Waves {
        initial_count: u32,
        wave_size: u32,
        max_total: u32,
        respawn_delay: f32,
    },
    /// Hostiles standing in the room from the start
    Guards {
        positions: Vec<(f32, f32)>,
    },
    Sequence {
        sequences: Vec<Vec<u8>>,
        pads: Vec<(f32, f32)>,
    },
    Lanterns {
        count: u32,
        lifetime: f32,
        respawn_delay: f32,
    },
    Plates {
        plates: Vec<(f32, f32)>,
        blocks: Vec<(f32, f32)>,
        #[serde(default = "default_true")]
        relock_while_unpressed: bool,
    },
}

impl ActivityDef {
    pub fn kind(&self) -> ActivityKind {
        match self {
            ActivityDef::Waves { .. } => ActivityKind::Waves,
            ActivityDef::Guards { .. } => ActivityKind::Guards,
            ActivityDef::Sequence { .. } => ActivityKind::Sequence,
            ActivityDef::Lanterns { .. } => ActivityKind::Lanterns,
            ActivityDef::Plates { .. } => ActivityKind::Plates,
        }
    }
}

// ============================================================================
// Gameplay defaults (gameplay_defaults.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DoorDefaults {
    pub close_delay: f32,
    /// Box checked for a lingering player before a delayed close
    pub threshold_size: (f32, f32),
    pub thickness: f32,
}

impl Default for DoorDefaults {
    fn default() -> Self {
        Self {
            close_delay: 0.35,
            threshold_size: (40.0, 28.0),
            thickness: 14.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    pub placement: PlacementSpec,
    pub doors: DoorDefaults,
    pub waves: WaveTiming,
    pub sequence: SequenceTiming,
    pub lanterns: LanternTiming,
    pub blocks: BlockTuning,
}

impl GameplayDefaults {
    pub fn activity_tuning(&self) -> ActivityTuning {
        ActivityTuning {
            waves: self.waves,
            sequence: self.sequence,
            lanterns: self.lanterns,
            blocks: self.blocks,
        }
    }
}
