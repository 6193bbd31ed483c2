//! Rooms domain: building room entities from content definitions.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::activities::{
    Activity, ActivityArena, ActivityConfigError, ActivityTuning, GuardPost, InertActivity,
    LanternConfig, LanternPuzzle, PlatePuzzle, PressurePlate, ProgressTile, SequenceDisplay,
    SequencePad, SequencePuzzle, WaveConfig, WaveSpawner,
};
use crate::combat::HostileBundle;
use crate::content::{
    ActivityDef, DoorDef, DoorDefaults, DoorSide, GameplayDefaults, RoomCatalog, RoomDef,
};
use crate::doors::{Door, ProximitySensor};
use crate::movement::{GameLayer, Obstacle, Pushable, Wall};
use crate::narrative::Npc;
use crate::placement::PlacementSpec;
use crate::rooms::components::{Room, RoomEncounter};
use crate::rooms::gate::Gate;
use crate::rooms::relationships::{ActivityOf, DoorOf, SpawnedBy};

/// Trigger is the interior shrunk by this much, so doors lock behind the player
const TRIGGER_INSET: f32 = 24.0;
/// How far a door's proximity sensor reaches out on each side of the wall
const SENSOR_REACH: f32 = 44.0;

const PAD_SIZE: f32 = 36.0;
const PLATE_SIZE: f32 = 36.0;
const TILE_SIZE: f32 = 14.0;
/// Display pads sit above their input pads
const DISPLAY_OFFSET: Vec2 = Vec2::new(0.0, 160.0);

const FLOOR_COLOR: Color = Color::srgb(0.18, 0.18, 0.2);
const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.38);
const OBSTACLE_COLOR: Color = Color::srgb(0.35, 0.3, 0.28);
const NPC_COLOR: Color = Color::srgb(0.45, 0.65, 0.5);
const BLOCK_COLOR: Color = Color::srgb(0.55, 0.45, 0.3);

pub(crate) fn spawn_rooms(
    mut commands: Commands,
    catalog: Res<RoomCatalog>,
    defaults: Res<GameplayDefaults>,
    tuning: Res<ActivityTuning>,
    existing_rooms: Query<(), With<Room>>,
) {
    if !existing_rooms.is_empty() {
        info!("[ROOM] Rooms already exist, skipping spawn");
        return;
    }

    for def in catalog.iter() {
        spawn_room(&mut commands, def, &defaults, &tuning);
    }
    info!("[ROOM] Spawned {} rooms", catalog.len());
}

fn spawn_room(
    commands: &mut Commands,
    def: &RoomDef,
    defaults: &GameplayDefaults,
    tuning: &ActivityTuning,
) {
    let center = def.center();
    let size = def.size();
    let trigger = (size - Vec2::splat(TRIGGER_INSET * 2.0)).max(Vec2::splat(8.0));

    let room = commands
        .spawn((
            Room {
                id: def.id.clone(),
                name: def.name.clone(),
                bounds: def.bounds(),
            },
            RoomEncounter::default(),
            Gate::new(def.gate.clone()),
            Transform::from_xyz(center.x, center.y, 0.0),
            Visibility::default(),
            Collider::rectangle(trigger.x, trigger.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ))
        .id();

    commands.spawn((
        Sprite {
            color: FLOOR_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -1.0),
        ChildOf(room),
    ));

    spawn_walls(commands, room, def, defaults.doors.thickness);

    for obstacle in &def.obstacles {
        let obstacle_size = Vec2::from(obstacle.size);
        commands.spawn((
            Obstacle,
            Sprite {
                color: OBSTACLE_COLOR,
                custom_size: Some(obstacle_size),
                ..default()
            },
            Transform::from_xyz(obstacle.offset.0, obstacle.offset.1, 0.5),
            RigidBody::Static,
            Collider::rectangle(obstacle_size.x, obstacle_size.y),
            CollisionLayers::new(
                GameLayer::Obstacle,
                [GameLayer::Player, GameLayer::Hostile, GameLayer::Block],
            ),
            ChildOf(room),
        ));
    }

    for door in &def.doors {
        spawn_door(commands, room, center, size, door, &defaults.doors);
    }

    for npc in &def.npcs {
        commands.spawn((
            Npc {
                id: npc.id.clone(),
                name: npc.name.clone(),
                lines: npc.lines.clone(),
            },
            Sprite {
                color: NPC_COLOR,
                custom_size: Some(Vec2::new(20.0, 28.0)),
                ..default()
            },
            Transform::from_xyz(npc.offset.0, npc.offset.1, 1.0),
            RigidBody::Static,
            Collider::rectangle(20.0, 28.0),
            CollisionLayers::new(GameLayer::Obstacle, [GameLayer::Player, GameLayer::Hostile]),
            ChildOf(room),
        ));
    }

    for activity_def in &def.activities {
        spawn_activity(
            commands,
            room,
            def,
            activity_def,
            defaults.placement,
            tuning,
        );
    }

    debug!(
        "[ROOM] Spawned '{}' with {} doors and {} activities",
        def.id,
        def.doors.len(),
        def.activities.len()
    );
}

fn spawn_walls(commands: &mut Commands, room: Entity, def: &RoomDef, thickness: f32) {
    let size = def.size();

    for side in [DoorSide::North, DoorSide::South, DoorSide::East, DoorSide::West] {
        let gaps: Vec<(f32, f32)> = def
            .doors
            .iter()
            .filter(|door| door.side == side)
            .map(|door| (door.offset, door.width))
            .collect();

        // North and South walls cover the corners
        let half_span = match side {
            DoorSide::North | DoorSide::South => size.x * 0.5 + thickness,
            DoorSide::East | DoorSide::West => size.y * 0.5,
        };

        for (start, end) in wall_segments(half_span, &gaps) {
            let (position, wall_size) = wall_piece(
                side,
                size,
                thickness,
                (start + end) * 0.5,
                end - start,
                thickness,
            );
            commands.spawn((
                Wall,
                Sprite {
                    color: WALL_COLOR,
                    custom_size: Some(wall_size),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, 0.0),
                RigidBody::Static,
                Collider::rectangle(wall_size.x, wall_size.y),
                CollisionLayers::new(
                    GameLayer::Wall,
                    [GameLayer::Player, GameLayer::Hostile, GameLayer::Block],
                ),
                ChildOf(room),
            ));
        }
    }
}

/// World-space center and size of a door panel.
pub(crate) fn door_footprint(
    room_center: Vec2,
    room_size: Vec2,
    def: &DoorDef,
    defaults: &DoorDefaults,
) -> (Vec2, Vec2) {
    let (position, size) = wall_piece(
        def.side,
        room_size,
        defaults.thickness,
        def.offset,
        def.width,
        defaults.thickness,
    );
    (room_center + position, size)
}

fn spawn_door(
    commands: &mut Commands,
    room: Entity,
    room_center: Vec2,
    room_size: Vec2,
    def: &DoorDef,
    defaults: &DoorDefaults,
) {
    let (position, _) = wall_piece(
        def.side,
        room_size,
        defaults.thickness,
        def.offset,
        def.width,
        defaults.thickness,
    );
    let (world, size) = door_footprint(room_center, room_size, def, defaults);
    let close_delay = Duration::from_secs_f32(defaults.close_delay.max(0.0));

    // Owned through DoorOf alone, so it is placed in world space
    let door = commands
        .spawn((
            Door::new(def.starts_open, close_delay),
            DoorOf(room),
            Sprite {
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(world.x, world.y, 0.5),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(
                GameLayer::Door,
                [GameLayer::Player, GameLayer::Hostile, GameLayer::Block],
            ),
        ))
        .id();

    let (_, sensor_size) = wall_piece(
        def.side,
        room_size,
        defaults.thickness,
        def.offset,
        def.width,
        defaults.thickness + SENSOR_REACH * 2.0,
    );
    commands.spawn((
        ProximitySensor::new(door, Vec2::from(defaults.threshold_size)),
        Transform::from_xyz(position.x, position.y, 0.0),
        Collider::rectangle(sensor_size.x, sensor_size.y),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ChildOf(room),
    ));
}

/// Build an activity from content, degrading to an inert activity on bad config
pub(crate) fn build_activity(
    room_id: &str,
    def: &ActivityDef,
    tuning: &ActivityTuning,
) -> Activity {
    match try_build_activity(def, tuning) {
        Ok(activity) => activity,
        Err(reason) => {
            warn!(
                "[ROOM] Room '{}': {:?} activity misconfigured ({}), it will complete on start",
                room_id,
                def.kind(),
                reason
            );
            Activity::Inert(InertActivity::new(def.kind(), reason))
        }
    }
}

pub(crate) fn try_build_activity(
    def: &ActivityDef,
    tuning: &ActivityTuning,
) -> Result<Activity, ActivityConfigError> {
    let activity = match def {
        ActivityDef::Waves {
            initial_count,
            wave_size,
            max_total,
            respawn_delay,
        } => Activity::Waves(WaveSpawner::new(
            WaveConfig {
                initial_count: *initial_count,
                wave_size: *wave_size,
                max_total: *max_total,
                respawn_delay: *respawn_delay,
            },
            tuning.waves,
        )?),
        ActivityDef::Guards { positions } => Activity::Guards(GuardPost::new(
            positions.len(),
            tuning.waves.poll_interval,
        )?),
        ActivityDef::Sequence { sequences, pads } => Activity::Sequence(SequencePuzzle::new(
            sequences.clone(),
            pads.len(),
            tuning.sequence,
        )?),
        ActivityDef::Lanterns {
            count,
            lifetime,
            respawn_delay,
        } => Activity::Lanterns(LanternPuzzle::new(LanternConfig {
            count: *count,
            lifetime: *lifetime,
            respawn_delay: *respawn_delay,
        })?),
        ActivityDef::Plates {
            plates,
            relock_while_unpressed,
            ..
        } => Activity::Plates(PlatePuzzle::new(plates.len(), *relock_while_unpressed)?),
    };
    Ok(activity)
}

fn spawn_activity(
    commands: &mut Commands,
    room: Entity,
    room_def: &RoomDef,
    def: &ActivityDef,
    placement: PlacementSpec,
    tuning: &ActivityTuning,
) {
    let mut activity = build_activity(&room_def.id, def, tuning);
    let entity = commands.spawn_empty().id();
    let origin = room_def.center();

    if let (Activity::Guards(post), ActivityDef::Guards { positions }) = (&mut activity, def) {
        for offset in positions {
            let position = origin + Vec2::from(*offset);
            let guard = commands
                .spawn((
                    HostileBundle::new(position, tuning.waves.hostile_health),
                    SpawnedBy(entity),
                ))
                .id();
            post.enlist(guard);
        }
    }

    // Misconfigured activities get no props to interact with
    let inert = matches!(activity, Activity::Inert(_));
    commands.entity(entity).insert((
        activity,
        ActivityArena {
            region: room_def.bounds(),
            placement,
        },
        ActivityOf(room),
    ));
    if inert {
        return;
    }

    match def {
        ActivityDef::Sequence { sequences, pads } => {
            spawn_sequence_props(commands, entity, origin, room_def, sequences.len(), pads)
        }
        ActivityDef::Plates { plates, blocks, .. } => {
            spawn_plate_props(commands, entity, origin, plates, blocks, tuning)
        }
        ActivityDef::Waves { .. }
        | ActivityDef::Guards { .. }
        | ActivityDef::Lanterns { .. } => {}
    }
}

fn spawn_sequence_props(
    commands: &mut Commands,
    puzzle: Entity,
    origin: Vec2,
    room_def: &RoomDef,
    sequence_count: usize,
    pads: &[(f32, f32)],
) {
    for (index, offset) in pads.iter().enumerate() {
        let Ok(index) = u8::try_from(index) else {
            warn!("[SEQUENCE] Room '{}' has more pads than supported", room_def.id);
            break;
        };
        let position = origin + Vec2::from(*offset);

        commands.spawn((
            SequencePad { puzzle, index },
            SpawnedBy(puzzle),
            Sprite {
                custom_size: Some(Vec2::splat(PAD_SIZE)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.2),
            Collider::rectangle(PAD_SIZE, PAD_SIZE),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ));

        let display = position + DISPLAY_OFFSET;
        commands.spawn((
            SequenceDisplay { puzzle, index },
            SpawnedBy(puzzle),
            Sprite {
                custom_size: Some(Vec2::splat(PAD_SIZE * 0.6)),
                ..default()
            },
            Transform::from_xyz(display.x, display.y, 0.2),
        ));
    }

    // Progress tiles run along the top edge of the room
    let top = room_def.bounds().max.y - TILE_SIZE;
    let spacing = TILE_SIZE * 1.6;
    let first_x = origin.x - spacing * (sequence_count.saturating_sub(1) as f32) * 0.5;
    for index in 0..sequence_count {
        commands.spawn((
            ProgressTile { puzzle, index },
            SpawnedBy(puzzle),
            Sprite {
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_xyz(first_x + spacing * index as f32, top, 0.2),
        ));
    }
}

fn spawn_plate_props(
    commands: &mut Commands,
    puzzle: Entity,
    origin: Vec2,
    plates: &[(f32, f32)],
    blocks: &[(f32, f32)],
    tuning: &ActivityTuning,
) {
    for (index, offset) in plates.iter().enumerate() {
        let position = origin + Vec2::from(*offset);
        commands.spawn((
            PressurePlate {
                puzzle,
                index,
                half_extents: Vec2::splat(PLATE_SIZE * 0.5),
            },
            SpawnedBy(puzzle),
            Sprite {
                custom_size: Some(Vec2::splat(PLATE_SIZE)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.1),
        ));
    }

    let block_size = tuning.blocks.size;
    for offset in blocks {
        let position = origin + Vec2::from(*offset);
        commands.spawn((
            Pushable,
            SpawnedBy(puzzle),
            Sprite {
                color: BLOCK_COLOR,
                custom_size: Some(Vec2::splat(block_size)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
            RigidBody::Kinematic,
            Collider::rectangle(block_size, block_size),
            CollisionLayers::new(GameLayer::Block, [GameLayer::Player, GameLayer::Hostile]),
        ));
    }
}

/// Solid stretches of a wall of half-length `half_span` once door gaps are cut.
/// Gaps are `(center, width)` along the wall and may overlap.
pub(crate) fn wall_segments(half_span: f32, gaps: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let mut cuts: Vec<(f32, f32)> = gaps
        .iter()
        .map(|(center, width)| {
            let half = width.max(0.0) * 0.5;
            (
                (center - half).max(-half_span),
                (center + half).min(half_span),
            )
        })
        .filter(|(start, end)| start < end)
        .collect();
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut segments = Vec::new();
    let mut cursor = -half_span;
    for (start, end) in cuts {
        if start > cursor {
            segments.push((cursor, start));
        }
        cursor = cursor.max(end);
    }
    if cursor < half_span {
        segments.push((cursor, half_span));
    }
    segments
}

/// Local position and size of a piece set into `side`'s wall.
/// `along` and `length` run parallel to the wall, `depth` across it.
pub(crate) fn wall_piece(
    side: DoorSide,
    room_size: Vec2,
    thickness: f32,
    along: f32,
    length: f32,
    depth: f32,
) -> (Vec2, Vec2) {
    let half = room_size * 0.5 + Vec2::splat(thickness * 0.5);
    match side {
        DoorSide::North => (Vec2::new(along, half.y), Vec2::new(length, depth)),
        DoorSide::South => (Vec2::new(along, -half.y), Vec2::new(length, depth)),
        DoorSide::East => (Vec2::new(half.x, along), Vec2::new(depth, length)),
        DoorSide::West => (Vec2::new(-half.x, along), Vec2::new(depth, length)),
    }
}
