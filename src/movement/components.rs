//! Movement domain: components and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Room boundary walls
    Wall,
    /// Static props that block movement and placement
    Obstacle,
    /// Door leaves (solid only while closed)
    Door,
    /// Player character
    Player,
    /// Wave hostiles
    Hostile,
    /// Pushable blocks
    Block,
    /// Sensors (room triggers, plates, pads, door thresholds) - never block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for static obstacle colliders
#[derive(Component, Debug)]
pub struct Obstacle;

/// A block the player can shove onto pressure plates
#[derive(Component, Debug)]
pub struct Pushable;
