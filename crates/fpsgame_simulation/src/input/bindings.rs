//! Input binding table: raw action/axis → player command
//!
//! Default table:
//!
//! | input                 | command      |
//! |-----------------------|--------------|
//! | Jump pressed          | Jump         |
//! | Fire pressed          | Fire         |
//! | SpawnBomb pressed     | PickupBomb   |
//! | SpawnBomb released    | ThrowBomb    |
//! | MoveForward / MoveRight | movement   |
//! | Turn / LookUp         | view         |

use bevy::prelude::*;

use super::events::{InputAction, InputAxis, InputEdge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PlayerCommand {
    Jump,
    Fire,
    PickupBomb,
    ThrowBomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AxisCommand {
    MoveForward,
    MoveRight,
    Turn,
    LookUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ActionBinding {
    pub action: InputAction,
    pub edge: InputEdge,
    pub command: PlayerCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AxisBinding {
    pub axis: InputAxis,
    pub command: AxisCommand,
    /// Multiplier on the raw value (-1.0 inverts)
    pub scale: f32,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputBindings {
    pub actions: Vec<ActionBinding>,
    pub axes: Vec<AxisBinding>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::empty()
            .bind_action(InputAction::Jump, InputEdge::Pressed, PlayerCommand::Jump)
            .bind_action(InputAction::Fire, InputEdge::Pressed, PlayerCommand::Fire)
            .bind_action(InputAction::SpawnBomb, InputEdge::Pressed, PlayerCommand::PickupBomb)
            .bind_action(InputAction::SpawnBomb, InputEdge::Released, PlayerCommand::ThrowBomb)
            .bind_axis(InputAxis::MoveForward, AxisCommand::MoveForward, 1.0)
            .bind_axis(InputAxis::MoveRight, AxisCommand::MoveRight, 1.0)
            .bind_axis(InputAxis::Turn, AxisCommand::Turn, 1.0)
            .bind_axis(InputAxis::LookUp, AxisCommand::LookUp, 1.0)
    }
}

impl InputBindings {
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            axes: Vec::new(),
        }
    }

    pub fn bind_action(mut self, action: InputAction, edge: InputEdge, command: PlayerCommand) -> Self {
        self.actions.push(ActionBinding {
            action,
            edge,
            command,
        });
        self
    }

    pub fn bind_axis(mut self, axis: InputAxis, command: AxisCommand, scale: f32) -> Self {
        self.axes.push(AxisBinding {
            axis,
            command,
            scale,
        });
        self
    }

    /// Commands bound to one edge of one action, in binding order
    pub fn commands_for(
        &self,
        action: InputAction,
        edge: InputEdge,
    ) -> impl Iterator<Item = PlayerCommand> + '_ {
        self.actions
            .iter()
            .filter(move |binding| binding.action == action && binding.edge == edge)
            .map(|binding| binding.command)
    }

    /// (command, scaled value) for every binding of `axis`
    pub fn axis_commands(
        &self,
        axis: InputAxis,
        value: f32,
    ) -> impl Iterator<Item = (AxisCommand, f32)> + '_ {
        self.axes
            .iter()
            .filter(move |binding| binding.axis == axis)
            .map(move |binding| (binding.command, value * binding.scale))
    }
}
