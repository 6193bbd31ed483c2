//! Combat domain: the liveness and hit signals rooms depend on.

mod components;
mod events;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{Health, Hittable, Hostile, Striker};
pub use events::{DamageEvent, DeathEvent, TargetHitEvent};
pub use spawn::HostileBundle;

use bevy::prelude::*;

use crate::combat::systems::{apply_damage, player_strike, process_deaths};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<TargetHitEvent>()
            .add_systems(
                Update,
                (player_strike, apply_damage, process_deaths).chain(),
            );
    }
}
