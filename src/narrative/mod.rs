//! Narrative domain: NPC dialogue and the talked-to flags gates depend on.

mod components;
mod events;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::Npc;
pub use events::NpcTalkedEvent;
pub use resources::{NarrativeState, NarrativeTuning};

use bevy::prelude::*;

use crate::core::GameState;
use crate::narrative::systems::talk_to_npcs;
use crate::rooms::RoomSet;

pub struct NarrativePlugin;

impl Plugin for NarrativePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NarrativeState>()
            .init_resource::<NarrativeTuning>()
            .add_message::<NpcTalkedEvent>()
            .add_systems(
                Update,
                talk_to_npcs
                    .in_set(RoomSet::Detect)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
