//! Rooms domain: tests for gates, encounters, room geometry, and activity wiring.

use std::collections::HashSet;
use std::time::Duration;

use avian2d::prelude::ColliderDisabled;
use bevy::prelude::*;

use super::spawn::{
    build_activity, door_footprint, try_build_activity, wall_piece, wall_segments,
};
use super::systems::{
    apply_activity_completions, apply_npc_talk, apply_relock_requests, condition_cleared,
    resolve_cleared_rooms, start_encounters,
};
use super::*;
use crate::activities::{
    Activity, ActivityCompletedEvent, ActivityConfigError, ActivityKind, ActivityTuning,
    HostileHost, InertActivity, Lifecycle, RelockDoorsRequest, WaveConfig, WaveSpawner,
    WaveTiming,
};
use crate::content::{ActivityDef, DoorDef, DoorDefaults, DoorSide};
use crate::doors::{Door, DoorState};
use crate::narrative::{NarrativeState, NpcTalkedEvent};

const STEP: Duration = Duration::from_millis(50);

fn requirements(required: &[GateCondition]) -> GateRequirements {
    GateRequirements {
        require_npc_talked: required.contains(&GateCondition::NpcTalked),
        npc_id: Some("warden".to_string()),
        require_combat_cleared: required.contains(&GateCondition::CombatCleared),
        require_puzzle_cleared: required.contains(&GateCondition::PuzzleCleared),
        require_level_completed: required.contains(&GateCondition::LevelCompleted),
    }
}

fn permutations(items: &[GateCondition]) -> Vec<Vec<GateCondition>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, *item);
            result.push(tail);
        }
    }
    result
}

// -----------------------------------------------------------------------------
// Gate tests
// -----------------------------------------------------------------------------

#[test]
fn test_gate_solves_regardless_of_order() {
    let orders = permutations(&GateCondition::ALL);
    assert_eq!(orders.len(), 24);

    for mask in 1u8..16 {
        let required: Vec<GateCondition> = GateCondition::ALL
            .into_iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, condition)| condition)
            .collect();

        for order in &orders {
            let mut gate = Gate::new(requirements(&required));
            let mut marked = HashSet::new();
            let mut opened = 0;

            for condition in order {
                marked.insert(*condition);
                let update = gate.mark_satisfied(*condition);
                let all_marked = required.iter().all(|r| marked.contains(r));

                assert_eq!(
                    gate.is_solved(),
                    all_marked,
                    "required {:?}, order {:?}",
                    required,
                    order
                );
                if update == GateUpdate::Opened {
                    opened += 1;
                }
            }
            assert_eq!(opened, 1);
        }
    }
}

#[test]
fn test_unrequired_conditions_never_solve() {
    let mut gate = Gate::new(requirements(&[GateCondition::PuzzleCleared]));

    assert_eq!(
        gate.mark_satisfied(GateCondition::NpcTalked),
        GateUpdate::Pending
    );
    assert_eq!(
        gate.mark_satisfied(GateCondition::CombatCleared),
        GateUpdate::Pending
    );
    assert_eq!(
        gate.mark_satisfied(GateCondition::LevelCompleted),
        GateUpdate::Pending
    );
    assert!(!gate.is_solved());
    assert_eq!(gate.missing(), vec![GateCondition::PuzzleCleared]);

    assert_eq!(
        gate.mark_satisfied(GateCondition::PuzzleCleared),
        GateUpdate::Opened
    );
}

#[test]
fn test_gate_is_inert_after_opening() {
    let mut gate = Gate::new(requirements(&[GateCondition::CombatCleared]));
    assert_eq!(
        gate.mark_satisfied(GateCondition::CombatCleared),
        GateUpdate::Opened
    );
    assert_eq!(
        gate.mark_satisfied(GateCondition::CombatCleared),
        GateUpdate::AlreadyOpen
    );
    assert_eq!(
        gate.mark_satisfied(GateCondition::NpcTalked),
        GateUpdate::AlreadyOpen
    );
    assert!(gate.is_solved());
    assert!(!gate.is_satisfied(GateCondition::NpcTalked));
}

#[test]
fn test_gate_without_requirements_waits_for_level() {
    let mut gate = Gate::new(GateRequirements::default());
    assert_eq!(gate.required(), vec![GateCondition::LevelCompleted]);

    assert_eq!(
        gate.mark_satisfied(GateCondition::CombatCleared),
        GateUpdate::Pending
    );
    assert_eq!(
        gate.mark_satisfied(GateCondition::LevelCompleted),
        GateUpdate::Opened
    );
}

#[test]
fn test_condition_for_activity() {
    for kind in [ActivityKind::Waves, ActivityKind::Guards] {
        assert_eq!(
            GateCondition::for_activity(kind),
            GateCondition::CombatCleared
        );
    }
    for kind in [
        ActivityKind::Sequence,
        ActivityKind::Lanterns,
        ActivityKind::Plates,
    ] {
        assert_eq!(
            GateCondition::for_activity(kind),
            GateCondition::PuzzleCleared
        );
    }
}

// -----------------------------------------------------------------------------
// Encounter tests
// -----------------------------------------------------------------------------

#[test]
fn test_encounter_starts_once() {
    let mut encounter = RoomEncounter::default();
    assert_eq!(encounter.phase(), EncounterPhase::Idle);
    assert!(!encounter.clear());

    assert!(encounter.activate());
    assert!(!encounter.activate());
    assert!(encounter.is_active());

    assert!(encounter.clear());
    assert_eq!(encounter.phase(), EncounterPhase::Cleared);
    assert!(!encounter.activate());
    assert!(!encounter.clear());
}

// -----------------------------------------------------------------------------
// Geometry tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_without_doors_is_one_segment() {
    assert_eq!(wall_segments(100.0, &[]), vec![(-100.0, 100.0)]);
}

#[test]
fn test_wall_with_center_door() {
    assert_eq!(
        wall_segments(100.0, &[(0.0, 40.0)]),
        vec![(-100.0, -20.0), (20.0, 100.0)]
    );
}

#[test]
fn test_wall_gaps_clamp_and_merge() {
    // Overlapping gaps merge; a gap at the edge leaves no sliver
    assert_eq!(
        wall_segments(100.0, &[(10.0, 40.0), (-5.0, 20.0), (95.0, 20.0)]),
        vec![(-100.0, -15.0), (30.0, 85.0)]
    );
}

#[test]
fn test_wall_piece_sides() {
    let size = Vec2::new(200.0, 100.0);
    let (north, north_size) = wall_piece(DoorSide::North, size, 10.0, 30.0, 40.0, 10.0);
    assert_eq!(north, Vec2::new(30.0, 55.0));
    assert_eq!(north_size, Vec2::new(40.0, 10.0));

    let (west, west_size) = wall_piece(DoorSide::West, size, 10.0, -10.0, 40.0, 90.0);
    assert_eq!(west, Vec2::new(-105.0, -10.0));
    assert_eq!(west_size, Vec2::new(90.0, 40.0));
}

#[test]
fn test_door_footprint_is_in_world_space() {
    let def = DoorDef {
        side: DoorSide::East,
        offset: 10.0,
        width: 56.0,
        starts_open: true,
    };
    let defaults = DoorDefaults::default();
    let (center, size) = door_footprint(
        Vec2::new(400.0, 0.0),
        Vec2::new(400.0, 300.0),
        &def,
        &defaults,
    );
    assert_eq!(center, Vec2::new(607.0, 10.0));
    assert_eq!(size, Vec2::new(14.0, 56.0));
}

// -----------------------------------------------------------------------------
// Activity construction tests
// -----------------------------------------------------------------------------

#[test]
fn test_build_each_activity_kind() {
    let tuning = ActivityTuning::default();
    let defs = [
        ActivityDef::Waves {
            initial_count: 2,
            wave_size: 3,
            max_total: 8,
            respawn_delay: 1.0,
        },
        ActivityDef::Guards {
            positions: vec![(0.0, 0.0), (40.0, 0.0)],
        },
        ActivityDef::Sequence {
            sequences: vec![vec![0, 1], vec![1, 0]],
            pads: vec![(0.0, 0.0), (40.0, 0.0)],
        },
        ActivityDef::Lanterns {
            count: 3,
            lifetime: 2.5,
            respawn_delay: 1.0,
        },
        ActivityDef::Plates {
            plates: vec![(0.0, 0.0)],
            blocks: vec![(0.0, 40.0)],
            relock_while_unpressed: true,
        },
    ];

    for def in &defs {
        let activity = try_build_activity(def, &tuning).expect("valid activity");
        assert_eq!(activity.kind(), def.kind());
        assert_eq!(activity.lifecycle(), Lifecycle::NotStarted);
    }
}

#[test]
fn test_misconfigured_activity_degrades_to_inert() {
    let tuning = ActivityTuning::default();
    let def = ActivityDef::Lanterns {
        count: 0,
        lifetime: 2.5,
        respawn_delay: 1.0,
    };
    assert_eq!(
        try_build_activity(&def, &tuning).err(),
        Some(ActivityConfigError::NoTargets)
    );

    let mut activity = build_activity("gallery", &def, &tuning);
    assert!(matches!(activity, Activity::Inert(_)));
    assert_eq!(activity.kind(), ActivityKind::Lanterns);
    assert!(!activity.is_completed());

    assert!(activity.start());
    let Activity::Inert(inert) = &mut activity else {
        unreachable!();
    };
    assert!(inert.tick());
    assert!(!inert.tick());
    assert!(activity.is_completed());
    assert!(activity.take_completion());
}

// -----------------------------------------------------------------------------
// End-to-end: wave room behind a combat gate
// -----------------------------------------------------------------------------

#[derive(Default)]
struct Arena {
    world: World,
    alive: HashSet<Entity>,
    materialized: usize,
}

impl HostileHost for Arena {
    fn find_spawn_point(&mut self) -> Option<Vec2> {
        Some(Vec2::ZERO)
    }

    fn materialize(&mut self, _position: Vec2) -> Entity {
        let entity = self.world.spawn_empty().id();
        self.alive.insert(entity);
        self.materialized += 1;
        entity
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }
}

#[test]
fn test_combat_room_opens_after_last_wave() {
    let mut gate = Gate::new(requirements(&[GateCondition::CombatCleared]));
    let mut encounter = RoomEncounter::default();
    let mut door = Door::new(true, Duration::from_secs_f32(0.35));
    let mut activity = Activity::Waves(
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
    );
    let mut arena = Arena::default();

    // Player enters
    assert!(encounter.activate());
    door.lock();
    assert!(activity.start());
    assert_eq!(door.state(), DoorState::Locked);
    assert!(!door.open());

    let mut elapsed = Duration::ZERO;
    while elapsed < Duration::from_secs(20) {
        let Activity::Waves(spawner) = &mut activity else {
            unreachable!();
        };
        spawner.tick(STEP, &mut arena);

        let budget = spawner.budget();
        assert!(budget.total_spawned + budget.pending_spawns <= budget.max_total);

        // The player cuts down whatever has settled in
        if !spawner.live().is_empty() {
            arena.alive.clear();
        }

        if activity.take_completion() {
            assert_eq!(
                gate.mark_satisfied(GateCondition::for_activity(activity.kind())),
                GateUpdate::Opened
            );
            door.unlock();
            door.open();
            assert!(encounter.clear());
            break;
        }
        assert_eq!(door.state(), DoorState::Locked);
        elapsed += STEP;
    }

    assert!(gate.is_solved());
    assert_eq!(door.state(), DoorState::Open);
    assert_eq!(arena.materialized, 8);
    let Activity::Waves(spawner) = &activity else {
        unreachable!();
    };
    assert_eq!(spawner.waves_released(), 3);
    assert_eq!(encounter.phase(), EncounterPhase::Cleared);
}

// -----------------------------------------------------------------------------
// Orchestrator systems
// -----------------------------------------------------------------------------

fn orchestrator_app() -> App {
    let mut app = App::new();
    app.init_resource::<NarrativeState>()
        .add_message::<PlayerEnteredRoomEvent>()
        .add_message::<NpcTalkedEvent>()
        .add_message::<ActivityCompletedEvent>()
        .add_message::<RelockDoorsRequest>()
        .add_message::<EncounterStartedEvent>()
        .add_message::<GateOpenedEvent>()
        .add_message::<RoomClearedEvent>()
        .add_systems(
            Update,
            (
                start_encounters,
                apply_npc_talk,
                apply_activity_completions,
                apply_relock_requests,
                resolve_cleared_rooms,
            )
                .chain(),
        );
    app
}

struct TestRoom {
    room: Entity,
    door: Entity,
    activities: Vec<Entity>,
}

fn inert(kind: ActivityKind) -> Activity {
    Activity::Inert(InertActivity::new(kind, ActivityConfigError::NoTargets))
}

fn spawn_test_room(app: &mut App, gate: GateRequirements, kinds: &[ActivityKind]) -> TestRoom {
    let world = app.world_mut();
    let room = world
        .spawn((
            Room {
                id: "test_room".to_string(),
                name: "Test Room".to_string(),
                bounds: Rect::from_center_size(Vec2::ZERO, Vec2::new(400.0, 300.0)),
            },
            RoomEncounter::default(),
            Gate::new(gate),
        ))
        .id();
    let door = world
        .spawn((Door::new(true, Duration::from_secs_f32(0.35)), DoorOf(room)))
        .id();
    let activities = kinds
        .iter()
        .map(|kind| world.spawn((inert(*kind), ActivityOf(room))).id())
        .collect();
    TestRoom {
        room,
        door,
        activities,
    }
}

fn enter(app: &mut App, room: Entity) {
    app.world_mut().write_message(PlayerEnteredRoomEvent { room });
    app.update();
}

/// Completes an activity and reports it the way the activity driver would
fn finish(app: &mut App, room: Entity, activity: Entity, report: bool) {
    let kind = {
        let mut entity = app.world_mut().entity_mut(activity);
        let mut activity = entity.get_mut::<Activity>().expect("activity");
        let Activity::Inert(inert) = &mut *activity else {
            unreachable!();
        };
        assert!(inert.tick());
        activity.kind()
    };
    if report {
        app.world_mut().write_message(ActivityCompletedEvent {
            room,
            activity,
            kind,
        });
    }
    app.update();
}

fn door_state(app: &App, door: Entity) -> DoorState {
    app.world().get::<Door>(door).expect("door").state()
}

fn gate(app: &App, room: Entity) -> &Gate {
    app.world().get::<Gate>(room).expect("gate")
}

#[test]
fn test_entry_locks_doors_and_starts_activities_once() {
    let mut app = orchestrator_app();
    let test = spawn_test_room(
        &mut app,
        requirements(&[GateCondition::PuzzleCleared]),
        &[ActivityKind::Sequence],
    );

    enter(&mut app, test.room);
    assert_eq!(door_state(&app, test.door), DoorState::Locked);
    let activity = app.world().get::<Activity>(test.activities[0]).unwrap();
    assert_eq!(activity.lifecycle(), Lifecycle::Running);
    let encounter = app.world().get::<RoomEncounter>(test.room).unwrap();
    assert_eq!(encounter.phase(), EncounterPhase::Active);

    // Re-entry after the door is unlocked by hand does not reseal it
    app.world_mut()
        .get_mut::<Door>(test.door)
        .unwrap()
        .unlock();
    enter(&mut app, test.room);
    assert_eq!(door_state(&app, test.door), DoorState::Closed);
}

#[test]
fn test_gate_solved_before_entry_keeps_doors_open() {
    let mut app = orchestrator_app();
    app.world_mut()
        .resource_mut::<NarrativeState>()
        .mark_talked("warden");
    let test = spawn_test_room(
        &mut app,
        requirements(&[GateCondition::NpcTalked]),
        &[ActivityKind::Lanterns],
    );

    enter(&mut app, test.room);
    assert!(gate(&app, test.room).is_solved());
    assert_eq!(door_state(&app, test.door), DoorState::Open);
}

#[test]
fn test_talk_to_other_npc_is_ignored() {
    let mut app = orchestrator_app();
    let test = spawn_test_room(
        &mut app,
        requirements(&[GateCondition::NpcTalked]),
        &[ActivityKind::Sequence],
    );
    enter(&mut app, test.room);

    app.world_mut().write_message(NpcTalkedEvent {
        npc_id: "ghost".to_string(),
    });
    app.update();
    assert!(!gate(&app, test.room).is_solved());
    assert_eq!(door_state(&app, test.door), DoorState::Locked);

    app.world_mut().write_message(NpcTalkedEvent {
        npc_id: "warden".to_string(),
    });
    app.update();
    assert!(gate(&app, test.room).is_solved());
    assert_eq!(door_state(&app, test.door), DoorState::Open);
}

#[test]
fn test_relock_only_while_gate_and_activity_are_open() {
    let mut app = orchestrator_app();
    let test = spawn_test_room(
        &mut app,
        requirements(&[GateCondition::PuzzleCleared]),
        &[ActivityKind::Plates, ActivityKind::Sequence],
    );
    let plates = test.activities[0];
    enter(&mut app, test.room);

    let unlock = |app: &mut App| {
        app.world_mut()
            .get_mut::<Door>(test.door)
            .unwrap()
            .unlock();
    };
    let relock = |app: &mut App| {
        app.world_mut().write_message(RelockDoorsRequest {
            room: test.room,
            activity: plates,
        });
        app.update();
    };

    unlock(&mut app);
    relock(&mut app);
    assert_eq!(door_state(&app, test.door), DoorState::Locked);

    // Completed plates no longer relock
    finish(&mut app, test.room, plates, false);
    unlock(&mut app);
    relock(&mut app);
    assert_eq!(door_state(&app, test.door), DoorState::Closed);
}

#[test]
fn test_relock_ignored_after_gate_opens() {
    let mut app = orchestrator_app();
    let test = spawn_test_room(
        &mut app,
        requirements(&[GateCondition::NpcTalked]),
        &[ActivityKind::Plates],
    );
    enter(&mut app, test.room);
    app.world_mut().write_message(NpcTalkedEvent {
        npc_id: "warden".to_string(),
    });
    app.update();
    assert_eq!(door_state(&app, test.door), DoorState::Open);

    app.world_mut().write_message(RelockDoorsRequest {
        room: test.room,
        activity: test.activities[0],
    });
    app.update();
    assert_eq!(door_state(&app, test.door), DoorState::Open);
}

#[test]
fn test_room_without_activities_clears_on_entry() {
    let mut app = orchestrator_app();
    let test = spawn_test_room(&mut app, GateRequirements::default(), &[]);

    enter(&mut app, test.room);

    let encounter = app.world().get::<RoomEncounter>(test.room).unwrap();
    assert_eq!(encounter.phase(), EncounterPhase::Cleared);
    assert!(gate(&app, test.room).is_satisfied(GateCondition::LevelCompleted));
    assert!(gate(&app, test.room).is_solved());
    assert_eq!(door_state(&app, test.door), DoorState::Open);
    assert!(app.world().get::<ColliderDisabled>(test.room).is_some());
}

#[test]
fn test_every_puzzle_must_finish_before_puzzle_gate_opens() {
    let mut app = orchestrator_app();
    let test = spawn_test_room(
        &mut app,
        requirements(&[GateCondition::PuzzleCleared]),
        &[ActivityKind::Sequence, ActivityKind::Lanterns],
    );
    enter(&mut app, test.room);

    finish(&mut app, test.room, test.activities[0], true);
    assert!(!gate(&app, test.room).is_satisfied(GateCondition::PuzzleCleared));
    assert_eq!(door_state(&app, test.door), DoorState::Locked);

    finish(&mut app, test.room, test.activities[1], true);
    assert!(gate(&app, test.room).is_solved());
    assert_eq!(door_state(&app, test.door), DoorState::Open);
}

#[test]
fn test_combat_gate_waits_for_waves_and_guards() {
    let mut app = orchestrator_app();
    let test = spawn_test_room(
        &mut app,
        requirements(&[GateCondition::CombatCleared]),
        &[ActivityKind::Guards, ActivityKind::Waves, ActivityKind::Sequence],
    );
    enter(&mut app, test.room);

    finish(&mut app, test.room, test.activities[0], true);
    assert_eq!(door_state(&app, test.door), DoorState::Locked);

    // The puzzle has no say over the combat condition
    finish(&mut app, test.room, test.activities[1], true);
    assert!(gate(&app, test.room).is_solved());
    assert_eq!(door_state(&app, test.door), DoorState::Open);
    let encounter = app.world().get::<RoomEncounter>(test.room).unwrap();
    assert_eq!(encounter.phase(), EncounterPhase::Active);
}

#[test]
fn test_condition_cleared_needs_every_matching_activity() {
    let mut running = inert(ActivityKind::Lanterns);
    running.start();
    let mut done = inert(ActivityKind::Sequence);
    done.start();
    let Activity::Inert(finished) = &mut done else {
        unreachable!();
    };
    finished.tick();

    assert!(!condition_cleared(
        GateCondition::PuzzleCleared,
        [&done, &running]
    ));
    assert!(condition_cleared(GateCondition::PuzzleCleared, [&done]));
    // No activity feeds the condition
    assert!(condition_cleared(GateCondition::CombatCleared, [&running]));
}
