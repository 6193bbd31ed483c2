//! Built-in demo rooms used when rooms.ron is missing or malformed.

use super::data::{ActivityDef, DoorDef, DoorSide, NpcDef, ObstacleDef, RoomDef};
use crate::rooms::GateRequirements;

const ROOM_SIZE: (f32, f32) = (440.0, 340.0);

fn door(side: DoorSide) -> DoorDef {
    DoorDef {
        side,
        offset: 0.0,
        width: 56.0,
        starts_open: true,
    }
}

fn room(id: &str, name: &str, column: i32) -> RoomDef {
    RoomDef {
        id: id.to_string(),
        name: name.to_string(),
        center: (column as f32 * ROOM_SIZE.0, 0.0),
        size: ROOM_SIZE,
        obstacles: Vec::new(),
        doors: vec![door(DoorSide::West), door(DoorSide::East)],
        gate: GateRequirements::default(),
        activities: Vec::new(),
        npcs: Vec::new(),
    }
}

/// A corridor of five rooms, one per gate flavor
pub fn builtin_rooms() -> Vec<RoomDef> {
    let mut entry = room("entry_hall", "Entry Hall", 0);
    entry.doors = vec![door(DoorSide::East)];
    entry.gate = GateRequirements {
        require_npc_talked: true,
        npc_id: Some("warden".to_string()),
        ..Default::default()
    };
    entry.npcs.push(NpcDef {
        id: "warden".to_string(),
        name: "Warden".to_string(),
        offset: (0.0, 80.0),
        lines: vec![
            "The rooms ahead seal behind you.".to_string(),
            "Clear each one and the way opens.".to_string(),
        ],
    });

    let mut barracks = room("barracks", "Barracks", 1);
    barracks.gate.require_combat_cleared = true;
    barracks.obstacles = vec![
        ObstacleDef {
            offset: (-90.0, 40.0),
            size: (40.0, 40.0),
        },
        ObstacleDef {
            offset: (90.0, -40.0),
            size: (40.0, 40.0),
        },
    ];
    barracks.activities.push(ActivityDef::Waves {
        initial_count: 2,
        wave_size: 3,
        max_total: 8,
        respawn_delay: 1.0,
    });
    barracks.activities.push(ActivityDef::Guards {
        positions: vec![(-150.0, -110.0), (150.0, 110.0)],
    });

    let mut chimes = room("chime_room", "Chime Room", 2);
    chimes.gate.require_puzzle_cleared = true;
    chimes.activities.push(ActivityDef::Sequence {
        sequences: vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]],
        pads: vec![(-120.0, -80.0), (-40.0, -80.0), (40.0, -80.0), (120.0, -80.0)],
    });

    let mut gallery = room("lantern_gallery", "Lantern Gallery", 3);
    gallery.gate.require_puzzle_cleared = true;
    gallery.activities.push(ActivityDef::Lanterns {
        count: 3,
        lifetime: 2.5,
        respawn_delay: 1.0,
    });

    let mut vault = room("vault", "Vault", 4);
    vault.doors = vec![door(DoorSide::West)];
    vault.gate.require_puzzle_cleared = true;
    vault.gate.require_level_completed = true;
    vault.activities.push(ActivityDef::Plates {
        plates: vec![(-120.0, 100.0), (120.0, 100.0)],
        blocks: vec![(-120.0, -20.0), (120.0, -20.0)],
        relock_while_unpressed: true,
    });

    vec![entry, barracks, chimes, gallery, vault]
}
