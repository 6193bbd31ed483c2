//! Activities domain: the activity component and the props activities drive.

use bevy::prelude::*;

use super::guards::GuardPost;
use super::lanterns::LanternPuzzle;
use super::plates::PlatePuzzle;
use super::sequence::SequencePuzzle;
use super::types::{ActivityKind, ActivityState, InertActivity, Lifecycle};
use super::waves::WaveSpawner;
use crate::placement::PlacementSpec;

/// One room activity. Lives on its own entity, parented to the room via `ActivityOf`.
#[derive(Component, Debug, Clone)]
pub enum Activity {
    Waves(WaveSpawner),
    Guards(GuardPost),
    Sequence(SequencePuzzle),
    Lanterns(LanternPuzzle),
    Plates(PlatePuzzle),
    Inert(InertActivity),
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::Waves(_) => ActivityKind::Waves,
            Activity::Guards(_) => ActivityKind::Guards,
            Activity::Sequence(_) => ActivityKind::Sequence,
            Activity::Lanterns(_) => ActivityKind::Lanterns,
            Activity::Plates(_) => ActivityKind::Plates,
            Activity::Inert(inert) => inert.kind,
        }
    }

    fn state(&self) -> &ActivityState {
        match self {
            Activity::Waves(spawner) => &spawner.state,
            Activity::Guards(post) => &post.state,
            Activity::Sequence(puzzle) => &puzzle.state,
            Activity::Lanterns(puzzle) => &puzzle.state,
            Activity::Plates(puzzle) => &puzzle.state,
            Activity::Inert(inert) => &inert.state,
        }
    }

    fn state_mut(&mut self) -> &mut ActivityState {
        match self {
            Activity::Waves(spawner) => &mut spawner.state,
            Activity::Guards(post) => &mut post.state,
            Activity::Sequence(puzzle) => &mut puzzle.state,
            Activity::Lanterns(puzzle) => &mut puzzle.state,
            Activity::Plates(puzzle) => &mut puzzle.state,
            Activity::Inert(inert) => &mut inert.state,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state().lifecycle()
    }

    pub fn is_completed(&self) -> bool {
        self.state().is_completed()
    }

    /// Idempotent; later calls are no-ops
    pub fn start(&mut self) -> bool {
        match self {
            Activity::Waves(spawner) => spawner.start(),
            Activity::Guards(post) => post.start(),
            Activity::Sequence(puzzle) => puzzle.start(),
            Activity::Lanterns(puzzle) => puzzle.start(),
            Activity::Plates(puzzle) => puzzle.start(),
            Activity::Inert(inert) => inert.start(),
        }
    }

    pub fn take_completion(&mut self) -> bool {
        self.state_mut().take_completion()
    }
}

/// Input pad of a sequence puzzle
#[derive(Component, Debug, Clone, Copy)]
pub struct SequencePad {
    pub puzzle: Entity,
    pub index: u8,
}

/// Display pad that replays the current sequence
#[derive(Component, Debug, Clone, Copy)]
pub struct SequenceDisplay {
    pub puzzle: Entity,
    pub index: u8,
}

/// One tile per sequence showing its progress mark
#[derive(Component, Debug, Clone, Copy)]
pub struct ProgressTile {
    pub puzzle: Entity,
    pub index: usize,
}

#[derive(Component, Debug, Clone)]
pub struct PadFlash(pub Timer);

#[derive(Component, Debug, Clone, Copy)]
pub struct Lantern {
    pub puzzle: Entity,
}

/// Farewell blink on solved lanterns; despawned when the blink ends
#[derive(Component, Debug, Clone)]
pub struct SolvedBlink {
    pub remaining: Timer,
    pub toggle: Timer,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct PressurePlate {
    pub puzzle: Entity,
    pub index: usize,
    pub half_extents: Vec2,
}

/// Interior rectangle an activity may place things into
#[derive(Component, Debug, Clone, Copy)]
pub struct ActivityArena {
    pub region: Rect,
    pub placement: PlacementSpec,
}

/// One grid step of a pushed block in flight
#[derive(Component, Debug, Clone)]
pub struct BlockSlide {
    pub from: Vec2,
    pub to: Vec2,
    pub timer: Timer,
}

impl BlockSlide {
    pub fn new(from: Vec2, to: Vec2, seconds: f32) -> Self {
        Self {
            from,
            to,
            timer: Timer::from_seconds(seconds.max(0.0), TimerMode::Once),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.to, self.timer.fraction())
    }

    pub fn is_done(&self) -> bool {
        self.timer.remaining_secs() == 0.0
    }
}
