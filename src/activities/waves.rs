//! Wave spawner: releases hostiles in waves under a hard total budget.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{ActivityConfigError, ActivityState};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WaveConfig {
    pub initial_count: u32,
    pub wave_size: u32,
    pub max_total: u32,
    /// Seconds between the room emptying and the next wave
    pub respawn_delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct WaveTiming {
    pub poll_interval: f32,
    /// Grace period before a freshly spawned hostile counts toward the budget
    pub spawn_settle: f32,
    pub hostile_health: f32,
}

impl Default for WaveTiming {
    fn default() -> Self {
        Self {
            poll_interval: 0.2,
            spawn_settle: 0.1,
            hostile_health: 3.0,
        }
    }
}

/// World access the spawner needs to place and observe hostiles.
pub trait HostileHost {
    /// Clear spawn point inside the room, or None when sampling is exhausted
    fn find_spawn_point(&mut self) -> Option<Vec2>;
    fn materialize(&mut self, position: Vec2) -> Entity;
    fn is_alive(&self, entity: Entity) -> bool;
}

/// Invariant: `total_spawned + pending_spawns <= max_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SpawnBudget {
    pub total_spawned: u32,
    pub pending_spawns: u32,
    pub max_total: u32,
}

impl SpawnBudget {
    pub fn new(max_total: u32) -> Self {
        Self {
            max_total,
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> u32 {
        self.max_total
            .saturating_sub(self.total_spawned + self.pending_spawns)
    }

    pub fn try_reserve(&mut self) -> bool {
        if self.remaining() == 0 {
            return false;
        }
        self.pending_spawns += 1;
        true
    }

    /// Give back a reservation that never produced an entity
    pub fn release(&mut self) {
        self.pending_spawns = self.pending_spawns.saturating_sub(1);
    }

    /// Convert a settled reservation into a counted spawn
    pub fn commit(&mut self) {
        self.pending_spawns = self.pending_spawns.saturating_sub(1);
        self.total_spawned += 1;
    }

    pub fn is_spent(&self) -> bool {
        self.total_spawned >= self.max_total
    }
}

#[derive(Debug, Clone)]
struct PendingSpawn {
    entity: Entity,
    settle: Timer,
}

#[derive(Debug, Clone)]
pub enum WavePhase {
    Dormant,
    Opening,
    Supervising { poll: Timer },
    AwaitingRespawn { delay: Timer },
    Finished,
}

#[derive(Debug, Clone)]
pub struct WaveSpawner {
    config: WaveConfig,
    timing: WaveTiming,
    budget: SpawnBudget,
    live: Vec<Entity>,
    pending: Vec<PendingSpawn>,
    phase: WavePhase,
    waves_released: u32,
    pub(crate) state: ActivityState,
}

impl WaveSpawner {
    pub fn new(config: WaveConfig, timing: WaveTiming) -> Result<Self, ActivityConfigError> {
        if config.max_total > 0 && config.wave_size == 0 && config.initial_count < config.max_total
        {
            return Err(ActivityConfigError::UnreachableBudget {
                max_total: config.max_total,
            });
        }
        if timing.poll_interval <= 0.0 {
            return Err(ActivityConfigError::NonPositiveDuration {
                field: "poll_interval",
            });
        }
        Ok(Self {
            budget: SpawnBudget::new(config.max_total),
            config,
            timing,
            live: Vec::new(),
            pending: Vec::new(),
            phase: WavePhase::Dormant,
            waves_released: 0,
            state: ActivityState::default(),
        })
    }

    pub fn budget(&self) -> SpawnBudget {
        self.budget
    }

    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn phase(&self) -> &WavePhase {
        &self.phase
    }

    pub fn waves_released(&self) -> u32 {
        self.waves_released
    }

    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.phase = WavePhase::Opening;
        true
    }

    pub fn tick<H: HostileHost + ?Sized>(&mut self, delta: Duration, host: &mut H) {
        if matches!(self.phase, WavePhase::Dormant | WavePhase::Finished) {
            return;
        }

        if matches!(self.phase, WavePhase::Opening) {
            let count = self.config.initial_count.min(self.config.max_total);
            self.release_wave(count, host);
            self.phase = self.supervising();
        }

        self.settle_pending(delta);
        self.live.retain(|entity| host.is_alive(*entity));

        let due = match &mut self.phase {
            WavePhase::Supervising { poll } => {
                poll.tick(delta);
                poll.times_finished_this_tick() > 0
            }
            WavePhase::AwaitingRespawn { delay } => {
                delay.tick(delta);
                delay.remaining_secs() == 0.0
            }
            _ => false,
        };
        if !due {
            return;
        }

        if matches!(self.phase, WavePhase::AwaitingRespawn { .. }) {
            let count = self.config.wave_size.min(self.budget.remaining());
            self.release_wave(count, host);
            self.phase = self.supervising();
        } else {
            self.poll();
        }
    }

    fn supervising(&self) -> WavePhase {
        WavePhase::Supervising {
            poll: Timer::from_seconds(self.timing.poll_interval, TimerMode::Repeating),
        }
    }

    fn poll(&mut self) {
        let room_empty = self.live.is_empty() && self.pending.is_empty();
        if !room_empty {
            return;
        }

        if self.budget.is_spent() {
            self.phase = WavePhase::Finished;
            if self.state.complete() {
                info!(
                    "[WAVES] Cleared after {} hostiles in {} waves",
                    self.budget.total_spawned, self.waves_released
                );
            }
        } else if self.budget.remaining() > 0 {
            debug!(
                "[WAVES] Room empty, next wave in {:.2}s ({}/{} spawned)",
                self.config.respawn_delay, self.budget.total_spawned, self.budget.max_total
            );
            self.phase = WavePhase::AwaitingRespawn {
                delay: Timer::from_seconds(self.config.respawn_delay.max(0.0), TimerMode::Once),
            };
        }
    }

    fn release_wave<H: HostileHost + ?Sized>(&mut self, count: u32, host: &mut H) {
        let mut released = 0;
        let mut skipped = 0;
        for _ in 0..count {
            if !self.budget.try_reserve() {
                break;
            }
            let Some(position) = host.find_spawn_point() else {
                self.budget.release();
                skipped += 1;
                continue;
            };
            let entity = host.materialize(position);
            self.pending.push(PendingSpawn {
                entity,
                settle: Timer::from_seconds(self.timing.spawn_settle.max(0.0), TimerMode::Once),
            });
            released += 1;
        }

        if released > 0 {
            self.waves_released += 1;
        }
        if skipped > 0 {
            warn!(
                "[WAVES] No clear spawn point for {} of {} hostiles",
                skipped, count
            );
        }
        debug!(
            "[WAVES] Released {} hostiles (budget {:?})",
            released, self.budget
        );
    }

    fn settle_pending(&mut self, delta: Duration) {
        let mut index = 0;
        while index < self.pending.len() {
            let spawn = &mut self.pending[index];
            spawn.settle.tick(delta);
            if spawn.settle.remaining_secs() == 0.0 {
                let settled = self.pending.swap_remove(index);
                self.budget.commit();
                self.live.push(settled.entity);
            } else {
                index += 1;
            }
        }
    }
}
