//! Guard room: hostiles placed with the room must all be cut down.

use std::time::Duration;

use bevy::prelude::*;

use super::types::{ActivityConfigError, ActivityState, Lifecycle};

#[derive(Debug, Clone)]
pub enum GuardPhase {
    Dormant,
    Watching { poll: Timer },
    Cleared,
}

/// Fixed roster of hostiles that exist before the player arrives.
/// Liveness is polled on an interval; completion needs every guard gone.
#[derive(Debug, Clone)]
pub struct GuardPost {
    roster: Vec<Entity>,
    poll_interval: f32,
    phase: GuardPhase,
    pub(crate) state: ActivityState,
}

impl GuardPost {
    pub fn new(guard_count: usize, poll_interval: f32) -> Result<Self, ActivityConfigError> {
        if guard_count == 0 {
            return Err(ActivityConfigError::NoGuards);
        }
        if poll_interval <= 0.0 {
            return Err(ActivityConfigError::NonPositiveDuration {
                field: "poll_interval",
            });
        }
        Ok(Self {
            roster: Vec::with_capacity(guard_count),
            poll_interval,
            phase: GuardPhase::Dormant,
            state: ActivityState::default(),
        })
    }

    /// Add a spawned guard to the roster. Ignored once the post is running.
    pub fn enlist(&mut self, entity: Entity) -> bool {
        if self.state.lifecycle() != Lifecycle::NotStarted {
            return false;
        }
        if self.roster.contains(&entity) {
            return false;
        }
        self.roster.push(entity);
        true
    }

    pub fn roster(&self) -> &[Entity] {
        &self.roster
    }

    pub fn phase(&self) -> &GuardPhase {
        &self.phase
    }

    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.phase = GuardPhase::Watching {
            poll: Timer::from_seconds(self.poll_interval, TimerMode::Repeating),
        };
        true
    }

    pub fn tick(&mut self, delta: Duration, is_alive: impl Fn(Entity) -> bool) {
        let GuardPhase::Watching { poll } = &mut self.phase else {
            return;
        };
        poll.tick(delta);
        if poll.times_finished_this_tick() == 0 {
            return;
        }

        self.roster.retain(|entity| is_alive(*entity));
        if !self.roster.is_empty() {
            return;
        }

        self.phase = GuardPhase::Cleared;
        if self.state.complete() {
            info!("[GUARDS] Every guard is down");
        }
    }
}
