//! Combat domain: health, identity, and hostile markers.

use bevy::prelude::*;

/// Health component for damageable entities. `is_player` is the identity
/// marker room triggers check before reacting to an entering collider.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub is_player: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            is_player: false,
        }
    }

    pub fn player(max: f32) -> Self {
        Self {
            is_player: true,
            ..Self::new(max)
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// Marks an entity spawned by a wave spawner
#[derive(Component, Debug)]
pub struct Hostile;

/// Marks an entity that reacts to `TargetHitEvent` (lanterns, switches)
#[derive(Component, Debug)]
pub struct Hittable;

/// Short-range strike the player uses against hostiles and targets
#[derive(Component, Debug, Clone)]
pub struct Striker {
    pub damage: f32,
    pub reach: f32,
}

impl Default for Striker {
    fn default() -> Self {
        Self {
            damage: 2.0,
            reach: 36.0,
        }
    }
}
