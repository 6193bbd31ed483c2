//! Narrative domain: talkable NPCs.

use bevy::prelude::*;

#[derive(Component, Debug, Clone)]
pub struct Npc {
    pub id: String,
    pub name: String,
    pub lines: Vec<String>,
}
