//! Activities domain: completion and door-control messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::activities::types::ActivityKind;

/// Written exactly once per activity, when it first completes
#[derive(Debug, Clone, Copy)]
pub struct ActivityCompletedEvent {
    pub room: Entity,
    pub activity: Entity,
    pub kind: ActivityKind,
}

impl Message for ActivityCompletedEvent {}

/// A puzzle saw partial progress and wants its room's doors locked
#[derive(Debug, Clone, Copy)]
pub struct RelockDoorsRequest {
    pub room: Entity,
    pub activity: Entity,
}

impl Message for RelockDoorsRequest {}
