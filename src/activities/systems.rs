//! Activities domain: ECS drivers around the activity state machines.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::activities::components::{
    Activity, ActivityArena, BlockSlide, Lantern, PadFlash, PressurePlate, ProgressTile,
    SequenceDisplay, SequencePad, SolvedBlink,
};
use crate::activities::events::{ActivityCompletedEvent, RelockDoorsRequest};
use crate::activities::lanterns::LanternHost;
use crate::activities::plates::PlateVerdict;
use crate::activities::sequence::{PadResponse, ProgressMark};
use crate::activities::tuning::ActivityTuning;
use crate::activities::waves::HostileHost;
use crate::combat::{Health, Hittable, HostileBundle, TargetHitEvent};
use crate::movement::{GameLayer, MovementInput, Player, Pushable};
use crate::placement::{PlacementBlockers, PlacementRng, SpatialBlockers, sample_clear_point};
use crate::rooms::{ActivityOf, SpawnedBy};

const LANTERN_SIZE: f32 = 14.0;
const LANTERN_UNLIT: Color = Color::srgb(0.35, 0.3, 0.2);
const LANTERN_LIT: Color = Color::srgb(1.0, 0.85, 0.35);

const PAD_IDLE: Color = Color::srgb(0.25, 0.25, 0.4);
const PAD_LIT: Color = Color::srgb(0.55, 0.75, 1.0);

const MIN_BLINK_INTERVAL: f32 = 0.02;

const PLATE_UP: Color = Color::srgb(0.4, 0.4, 0.4);
const PLATE_DOWN: Color = Color::srgb(0.3, 0.7, 0.35);

/// Layers a newly placed hostile or lantern must keep clear of
pub(crate) fn placement_filter() -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask([
        GameLayer::Wall,
        GameLayer::Obstacle,
        GameLayer::Door,
        GameLayer::Player,
        GameLayer::Hostile,
        GameLayer::Block,
    ])
}

// ============================================================
// Hosts
// ============================================================

struct EcsHostileHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    blockers: &'a dyn PlacementBlockers,
    rng: &'a mut ChaCha8Rng,
    arena: ActivityArena,
    alive: &'a dyn Fn(Entity) -> bool,
    spawner: Entity,
    hostile_health: f32,
}

impl HostileHost for EcsHostileHost<'_, '_, '_> {
    fn find_spawn_point(&mut self) -> Option<Vec2> {
        sample_clear_point(
            self.arena.region,
            &self.arena.placement,
            self.blockers,
            &mut *self.rng,
        )
    }

    fn materialize(&mut self, position: Vec2) -> Entity {
        self.commands
            .spawn((
                HostileBundle::new(position, self.hostile_health),
                SpawnedBy(self.spawner),
            ))
            .id()
    }

    fn is_alive(&self, entity: Entity) -> bool {
        (self.alive)(entity)
    }
}

struct EcsLanternHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    blockers: &'a dyn PlacementBlockers,
    rng: &'a mut ChaCha8Rng,
    arena: ActivityArena,
    puzzle: Entity,
}

impl LanternHost for EcsLanternHost<'_, '_, '_> {
    fn place_target(&mut self) -> Option<Entity> {
        let position = sample_clear_point(
            self.arena.region,
            &self.arena.placement,
            self.blockers,
            &mut *self.rng,
        )?;

        let entity = self
            .commands
            .spawn((
                Lantern {
                    puzzle: self.puzzle,
                },
                Hittable,
                SpawnedBy(self.puzzle),
                Sprite {
                    color: LANTERN_UNLIT,
                    custom_size: Some(Vec2::splat(LANTERN_SIZE)),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, 1.0),
            ))
            .id();
        Some(entity)
    }

    fn discard_target(&mut self, entity: Entity) {
        self.commands.entity(entity).try_despawn();
    }
}

// ============================================================
// Detect: input and contact
// ============================================================

pub(crate) fn press_sequence_pads(
    mut commands: Commands,
    mut collision_start_events: MessageReader<CollisionStart>,
    pad_query: Query<&SequencePad>,
    health_query: Query<&Health>,
    mut activity_query: Query<&mut Activity>,
) {
    let is_player = |entity: Entity| health_query.get(entity).is_ok_and(|h| h.is_player);

    for event in collision_start_events.read() {
        let (pad_entity, other) = if pad_query.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if pad_query.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };
        if !is_player(other) {
            continue;
        }

        let Ok(pad) = pad_query.get(pad_entity) else {
            continue;
        };
        let Ok(mut activity) = activity_query.get_mut(pad.puzzle) else {
            continue;
        };
        let Activity::Sequence(puzzle) = &mut *activity else {
            continue;
        };

        let response = puzzle.press(pad.index);
        if response == PadResponse::Ignored {
            continue;
        }

        commands.entity(pad_entity).insert(PadFlash(Timer::from_seconds(
            puzzle.timing().press_flash.max(0.0),
            TimerMode::Once,
        )));
        match response {
            PadResponse::Correct => info!(
                "[SEQUENCE] Sequence {}/{} correct",
                puzzle.cursor(),
                puzzle.sequence_count()
            ),
            PadResponse::Wrong => info!("[SEQUENCE] Wrong sequence, replaying"),
            _ => {}
        }
    }
}

/// Lanterns light from a strike or from E within interaction range
pub(crate) fn activate_lanterns(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<ActivityTuning>,
    mut hit_events: MessageReader<TargetHitEvent>,
    player_query: Query<&Transform, With<Player>>,
    lantern_query: Query<(Entity, &Lantern, &Transform)>,
    mut activity_query: Query<&mut Activity>,
) {
    let mut requests: Vec<(Entity, Entity)> = hit_events
        .read()
        .filter_map(|event| {
            lantern_query
                .get(event.target)
                .ok()
                .map(|(entity, lantern, _)| (lantern.puzzle, entity))
        })
        .collect();

    if keyboard.just_pressed(KeyCode::KeyE) {
        if let Ok(player_transform) = player_query.single() {
            let origin = player_transform.translation.truncate();
            requests.extend(
                lantern_query
                    .iter()
                    .filter(|(_, _, transform)| {
                        transform.translation.truncate().distance(origin)
                            <= tuning.lanterns.interact_radius
                    })
                    .map(|(entity, lantern, _)| (lantern.puzzle, entity)),
            );
        }
    }

    for (puzzle_entity, lantern) in requests {
        let Ok(mut activity) = activity_query.get_mut(puzzle_entity) else {
            continue;
        };
        if let Activity::Lanterns(puzzle) = &mut *activity {
            puzzle.activate(lantern);
        }
    }
}

/// Mirrors block positions onto plate occupancy
pub(crate) fn track_plate_weights(
    plate_query: Query<(&PressurePlate, &GlobalTransform)>,
    block_query: Query<(Entity, &GlobalTransform), With<Pushable>>,
    mut activity_query: Query<(&mut Activity, &ActivityOf)>,
    mut relock_requests: MessageWriter<RelockDoorsRequest>,
) {
    for (plate, plate_transform) in &plate_query {
        let Ok((mut activity, activity_of)) = activity_query.get_mut(plate.puzzle) else {
            continue;
        };
        let Activity::Plates(puzzle) = &mut *activity else {
            continue;
        };

        let area = Rect::from_center_half_size(
            plate_transform.translation().truncate(),
            plate.half_extents,
        );

        for (block, block_transform) in &block_query {
            let resting = area.contains(block_transform.translation().truncate());
            let recorded = puzzle
                .plates()
                .get(plate.index)
                .is_some_and(|occupancy| occupancy.contains(block));

            let verdict = match (resting, recorded) {
                (true, false) => puzzle.on_enter(plate.index, block),
                (false, true) => puzzle.on_exit(plate.index, block),
                _ => continue,
            };

            if verdict == PlateVerdict::Relock {
                relock_requests.write(RelockDoorsRequest {
                    room: activity_of.0,
                    activity: plate.puzzle,
                });
            }
        }
    }
}

/// Dominant-axis push direction from raw input, if any
pub(crate) fn push_direction(axis: Vec2) -> Option<Vec2> {
    if axis.x.abs() < 0.1 && axis.y.abs() < 0.1 {
        return None;
    }
    if axis.x.abs() > axis.y.abs() {
        Some(Vec2::new(axis.x.signum(), 0.0))
    } else {
        Some(Vec2::new(0.0, axis.y.signum()))
    }
}

/// Player walking into a resting block shoves it one tile if the tile is clear
pub(crate) fn push_blocks(
    mut commands: Commands,
    input: Res<MovementInput>,
    tuning: Res<ActivityTuning>,
    spatial_query: SpatialQuery,
    player_query: Query<&Transform, With<Player>>,
    block_query: Query<(Entity, &Transform), (With<Pushable>, Without<BlockSlide>)>,
) {
    let Some(direction) = push_direction(input.axis) else {
        return;
    };
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player = player_transform.translation.truncate();
    let blocks = tuning.blocks;
    let contact_reach = blocks.size * 0.5 + 14.0;

    for (entity, transform) in &block_query {
        let block = transform.translation.truncate();
        let offset = block - player;
        if offset.length() > contact_reach || offset.dot(direction) <= 0.0 {
            continue;
        }

        let target = block + direction * blocks.tile_size;
        let footprint = Collider::rectangle(blocks.size * 0.9, blocks.size * 0.9);
        let filter = SpatialQueryFilter::from_mask([
            GameLayer::Wall,
            GameLayer::Obstacle,
            GameLayer::Door,
            GameLayer::Block,
            GameLayer::Hostile,
        ])
        .with_excluded_entities([entity]);
        if !spatial_query
            .shape_intersections(&footprint, target, 0.0, &filter)
            .is_empty()
        {
            continue;
        }

        commands
            .entity(entity)
            .insert(BlockSlide::new(block, target, blocks.slide_seconds));
    }
}

// ============================================================
// Activities: state machine ticks
// ============================================================

pub(crate) fn drive_wave_spawners(
    mut commands: Commands,
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut rng: ResMut<PlacementRng>,
    tuning: Res<ActivityTuning>,
    mut activity_query: Query<(Entity, &mut Activity, &ActivityArena)>,
    health_query: Query<&Health>,
) {
    let blockers = SpatialBlockers::new(&spatial_query, placement_filter());
    let alive = |entity: Entity| health_query.get(entity).is_ok_and(|h| h.is_alive());

    for (entity, mut activity, arena) in &mut activity_query {
        let Activity::Waves(spawner) = &mut *activity else {
            continue;
        };

        let mut host = EcsHostileHost {
            commands: &mut commands,
            blockers: &blockers,
            rng: &mut rng.0,
            arena: *arena,
            alive: &alive,
            spawner: entity,
            hostile_health: tuning.waves.hostile_health,
        };
        spawner.tick(time.delta(), &mut host);
    }
}

pub(crate) fn drive_guard_posts(
    time: Res<Time>,
    mut activity_query: Query<&mut Activity>,
    health_query: Query<&Health>,
) {
    let alive = |entity: Entity| health_query.get(entity).is_ok_and(|h| h.is_alive());

    for mut activity in &mut activity_query {
        if let Activity::Guards(post) = &mut *activity {
            post.tick(time.delta(), &alive);
        }
    }
}

pub(crate) fn drive_sequence_puzzles(time: Res<Time>, mut activity_query: Query<&mut Activity>) {
    for mut activity in &mut activity_query {
        if let Activity::Sequence(puzzle) = &mut *activity {
            puzzle.tick(time.delta());
        }
    }
}

pub(crate) fn drive_lantern_puzzles(
    mut commands: Commands,
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut rng: ResMut<PlacementRng>,
    tuning: Res<ActivityTuning>,
    mut activity_query: Query<(Entity, &mut Activity, &ActivityArena)>,
) {
    let blockers = SpatialBlockers::new(&spatial_query, placement_filter());
    let blink = tuning.lanterns;

    for (entity, mut activity, arena) in &mut activity_query {
        let Activity::Lanterns(puzzle) = &mut *activity else {
            continue;
        };

        let mut host = EcsLanternHost {
            commands: &mut commands,
            blockers: &blockers,
            rng: &mut rng.0,
            arena: *arena,
            puzzle: entity,
        };
        puzzle.tick(time.delta(), &mut host);

        for lantern in puzzle.take_solved_targets() {
            commands.entity(lantern).insert(SolvedBlink {
                remaining: Timer::from_seconds(blink.blink_duration.max(0.0), TimerMode::Once),
                toggle: Timer::from_seconds(
                    blink.blink_interval.max(MIN_BLINK_INTERVAL),
                    TimerMode::Repeating,
                ),
            });
        }
    }
}

pub(crate) fn drive_plate_puzzles(
    mut activity_query: Query<(Entity, &mut Activity, &ActivityOf)>,
    mut relock_requests: MessageWriter<RelockDoorsRequest>,
) {
    for (entity, mut activity, activity_of) in &mut activity_query {
        let Activity::Plates(puzzle) = &mut *activity else {
            continue;
        };
        if puzzle.tick() == PlateVerdict::Relock {
            relock_requests.write(RelockDoorsRequest {
                room: activity_of.0,
                activity: entity,
            });
        }
    }
}

pub(crate) fn drive_inert_activities(mut activity_query: Query<&mut Activity>) {
    for mut activity in &mut activity_query {
        let Activity::Inert(inert) = &mut *activity else {
            continue;
        };
        if inert.tick() {
            warn!(
                "[ROOM] {:?} activity completed without running: {}",
                inert.kind, inert.reason
            );
        }
    }
}

pub(crate) fn slide_blocks(
    mut commands: Commands,
    time: Res<Time>,
    mut block_query: Query<(Entity, &mut BlockSlide, &mut Transform)>,
) {
    for (entity, mut slide, mut transform) in &mut block_query {
        slide.timer.tick(time.delta());
        let position = slide.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        if slide.is_done() {
            commands.entity(entity).remove::<BlockSlide>();
        }
    }
}

// ============================================================
// Report: completion reporting
// ============================================================

/// Converts first-time completions into `ActivityCompletedEvent`
pub(crate) fn report_completions(
    mut activity_query: Query<(Entity, &mut Activity, &ActivityOf)>,
    mut completed_events: MessageWriter<ActivityCompletedEvent>,
) {
    for (entity, mut activity, activity_of) in &mut activity_query {
        if !activity.is_completed() || !activity.take_completion() {
            continue;
        }
        completed_events.write(ActivityCompletedEvent {
            room: activity_of.0,
            activity: entity,
            kind: activity.kind(),
        });
    }
}

// ============================================================
// Cosmetic
// ============================================================

pub(crate) fn sync_sequence_visuals(
    activity_query: Query<&Activity>,
    mut display_query: Query<(&SequenceDisplay, &mut Sprite), Without<ProgressTile>>,
    mut tile_query: Query<(&ProgressTile, &mut Sprite), Without<SequenceDisplay>>,
) {
    for (display, mut sprite) in &mut display_query {
        let Ok(Activity::Sequence(puzzle)) = activity_query.get(display.puzzle) else {
            continue;
        };
        sprite.color = if puzzle.lit_pad() == Some(display.index) {
            PAD_LIT
        } else {
            PAD_IDLE
        };
    }

    for (tile, mut sprite) in &mut tile_query {
        let Ok(Activity::Sequence(puzzle)) = activity_query.get(tile.puzzle) else {
            continue;
        };
        sprite.color = match puzzle.progress().get(tile.index) {
            Some(ProgressMark::Ok) => Color::srgb(0.3, 0.8, 0.4),
            Some(ProgressMark::Fail) => Color::srgb(0.85, 0.25, 0.25),
            _ => Color::srgb(0.3, 0.3, 0.3),
        };
    }
}

pub(crate) fn flash_pressed_pads(
    mut commands: Commands,
    time: Res<Time>,
    mut pad_query: Query<(Entity, Option<&mut PadFlash>, &mut Sprite), With<SequencePad>>,
) {
    for (entity, flash, mut sprite) in &mut pad_query {
        let Some(mut flash) = flash else {
            sprite.color = PAD_IDLE;
            continue;
        };
        flash.0.tick(time.delta());
        if flash.0.remaining_secs() == 0.0 {
            commands.entity(entity).remove::<PadFlash>();
            sprite.color = PAD_IDLE;
        } else {
            sprite.color = PAD_LIT;
        }
    }
}

pub(crate) fn sync_plate_visuals(
    activity_query: Query<&Activity>,
    mut plate_query: Query<(&PressurePlate, &mut Sprite)>,
) {
    for (plate, mut sprite) in &mut plate_query {
        let Ok(Activity::Plates(puzzle)) = activity_query.get(plate.puzzle) else {
            continue;
        };
        let pressed = puzzle
            .plates()
            .get(plate.index)
            .is_some_and(|occupancy| occupancy.is_pressed());
        sprite.color = if pressed { PLATE_DOWN } else { PLATE_UP };
    }
}

pub(crate) fn sync_lantern_visuals(
    activity_query: Query<&Activity>,
    mut lantern_query: Query<(Entity, &Lantern, &mut Sprite), Without<SolvedBlink>>,
) {
    for (entity, lantern, mut sprite) in &mut lantern_query {
        let Ok(Activity::Lanterns(puzzle)) = activity_query.get(lantern.puzzle) else {
            continue;
        };
        let lit = puzzle
            .targets()
            .iter()
            .any(|target| target.entity == entity && target.lit);
        sprite.color = if lit { LANTERN_LIT } else { LANTERN_UNLIT };
    }
}

pub(crate) fn blink_solved_lanterns(
    mut commands: Commands,
    time: Res<Time>,
    mut lantern_query: Query<(Entity, &mut SolvedBlink, &mut Sprite)>,
) {
    for (entity, mut blink, mut sprite) in &mut lantern_query {
        blink.remaining.tick(time.delta());
        blink.toggle.tick(time.delta());

        if blink.remaining.remaining_secs() == 0.0 {
            commands.entity(entity).try_despawn();
            continue;
        }
        if blink.toggle.times_finished_this_tick() % 2 == 1 {
            sprite.color = if sprite.color == LANTERN_LIT {
                LANTERN_UNLIT
            } else {
                LANTERN_LIT
            };
        }
    }
}
