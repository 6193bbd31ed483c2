//! Narrative domain: dialogue messages.

use bevy::ecs::message::Message;

/// Written the first time the player finishes talking to an NPC
#[derive(Debug, Clone)]
pub struct NpcTalkedEvent {
    pub npc_id: String,
}

impl Message for NpcTalkedEvent {}
