//! Raw input events delivered by the host
//!
//! Actions are edge-triggered (press/release), axes are continuous and
//! usually sent every frame, zero included.

use bevy::prelude::*;

/// Named edge-triggered action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputAction {
    Jump,
    Fire,
    /// Press picks a bomb up, release throws it
    SpawnBomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputEdge {
    Pressed,
    Released,
}

/// Named continuous axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InputAxis {
    MoveForward,
    MoveRight,
    Turn,
    LookUp,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActionInput {
    pub action: InputAction,
    pub edge: InputEdge,
}

impl ActionInput {
    pub fn pressed(action: InputAction) -> Self {
        Self {
            action,
            edge: InputEdge::Pressed,
        }
    }

    pub fn released(action: InputAction) -> Self {
        Self {
            action,
            edge: InputEdge::Released,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AxisInput {
    pub axis: InputAxis,
    pub value: f32,
}

impl AxisInput {
    pub fn new(axis: InputAxis, value: f32) -> Self {
        Self { axis, value }
    }
}
