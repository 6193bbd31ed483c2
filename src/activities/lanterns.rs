//! Lantern puzzle: light every target in the current attempt before it expires.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{ActivityConfigError, ActivityState};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LanternConfig {
    pub count: u32,
    /// Seconds an attempt's targets stay up
    pub lifetime: f32,
    pub respawn_delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LanternTiming {
    pub blink_duration: f32,
    pub blink_interval: f32,
    pub interact_radius: f32,
}

impl Default for LanternTiming {
    fn default() -> Self {
        Self {
            blink_duration: 1.5,
            blink_interval: 0.08,
            interact_radius: 40.0,
        }
    }
}

/// World access for placing and removing lantern targets
pub trait LanternHost {
    /// Place one target at a clear point, or None when sampling is exhausted
    fn place_target(&mut self) -> Option<Entity>;
    fn discard_target(&mut self, entity: Entity);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanternTarget {
    pub entity: Entity,
    pub lit: bool,
}

#[derive(Debug, Clone)]
pub enum LanternPhase {
    Dormant,
    Placing,
    Window { timer: Timer },
    Cooldown { timer: Timer },
    Solved,
}

#[derive(Debug, Clone)]
pub struct LanternPuzzle {
    config: LanternConfig,
    targets: Vec<LanternTarget>,
    attempt: u32,
    phase: LanternPhase,
    pub(crate) state: ActivityState,
}

impl LanternPuzzle {
    pub fn new(config: LanternConfig) -> Result<Self, ActivityConfigError> {
        if config.count == 0 {
            return Err(ActivityConfigError::NoTargets);
        }
        if config.lifetime <= 0.0 {
            return Err(ActivityConfigError::NonPositiveDuration { field: "lifetime" });
        }
        Ok(Self {
            config,
            targets: Vec::new(),
            attempt: 0,
            phase: LanternPhase::Dormant,
            state: ActivityState::default(),
        })
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn targets(&self) -> &[LanternTarget] {
        &self.targets
    }

    pub fn lit_count(&self) -> usize {
        self.targets.iter().filter(|target| target.lit).count()
    }

    pub fn phase(&self) -> &LanternPhase {
        &self.phase
    }

    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.phase = LanternPhase::Placing;
        true
    }

    /// Light a target of the current attempt; stale or repeated hits are ignored
    pub fn activate(&mut self, entity: Entity) -> bool {
        if !matches!(self.phase, LanternPhase::Window { .. }) {
            return false;
        }
        match self.targets.iter_mut().find(|target| target.entity == entity) {
            Some(target) if !target.lit => {
                target.lit = true;
                debug!(
                    "[LANTERNS] Lit {}/{} (attempt {})",
                    self.targets.iter().filter(|t| t.lit).count(),
                    self.config.count,
                    self.attempt
                );
                true
            }
            _ => false,
        }
    }

    /// Success is checked before expiry, so a final hit on the expiring tick still counts
    pub fn tick<H: LanternHost + ?Sized>(&mut self, delta: Duration, host: &mut H) {
        match &mut self.phase {
            LanternPhase::Placing => self.begin_attempt(host),
            LanternPhase::Window { timer } => {
                if self.targets.iter().all(|target| target.lit) {
                    self.phase = LanternPhase::Solved;
                    if self.state.complete() {
                        info!("[LANTERNS] Solved on attempt {}", self.attempt);
                    }
                    return;
                }
                timer.tick(delta);
                if timer.remaining_secs() == 0.0 {
                    debug!(
                        "[LANTERNS] Attempt {} expired with {}/{} lit",
                        self.attempt,
                        self.lit_count(),
                        self.config.count
                    );
                    self.discard_all(host);
                    self.phase = self.cooldown();
                }
            }
            LanternPhase::Cooldown { timer } => {
                timer.tick(delta);
                if timer.remaining_secs() == 0.0 {
                    self.begin_attempt(host);
                }
            }
            LanternPhase::Dormant | LanternPhase::Solved => {}
        }
    }

    /// Hands the solved set to the caller for its farewell blink
    pub fn take_solved_targets(&mut self) -> Vec<Entity> {
        if !matches!(self.phase, LanternPhase::Solved) {
            return Vec::new();
        }
        self.targets.drain(..).map(|target| target.entity).collect()
    }

    fn cooldown(&self) -> LanternPhase {
        LanternPhase::Cooldown {
            timer: Timer::from_seconds(self.config.respawn_delay.max(0.0), TimerMode::Once),
        }
    }

    fn begin_attempt<H: LanternHost + ?Sized>(&mut self, host: &mut H) {
        self.discard_all(host);
        self.attempt += 1;

        for _ in 0..self.config.count {
            match host.place_target() {
                Some(entity) => self.targets.push(LanternTarget { entity, lit: false }),
                None => {
                    warn!(
                        "[LANTERNS] Placement exhausted on attempt {}, retrying after cooldown",
                        self.attempt
                    );
                    self.discard_all(host);
                    self.phase = self.cooldown();
                    return;
                }
            }
        }

        debug!(
            "[LANTERNS] Attempt {} placed {} targets",
            self.attempt, self.config.count
        );
        self.phase = LanternPhase::Window {
            timer: Timer::from_seconds(self.config.lifetime, TimerMode::Once),
        };
    }

    fn discard_all<H: LanternHost + ?Sized>(&mut self, host: &mut H) {
        for target in self.targets.drain(..) {
            host.discard_target(target.entity);
        }
    }
}
