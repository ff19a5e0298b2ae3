//! Input dispatch system
//!
//! Reads raw `ActionInput`/`AxisInput`, looks each one up in
//! `InputBindings` and writes the matching intent for the player agent.
//!
//! Incapacitated players get nothing: input stays disabled for good.

use bevy::prelude::*;

use super::bindings::{AxisCommand, InputBindings, PlayerCommand};
use super::events::{ActionInput, AxisInput};
use crate::character::{JumpIntent, LookAxis, LookIntent, MoveAxis, MoveIntent};
use crate::combat::FireIntent;
use crate::components::{Incapacitated, Player};
use crate::interaction::{PickupIntent, ThrowIntent};

/// Bundles the intent writers so the system signature stays readable
#[derive(bevy::ecs::system::SystemParam)]
pub struct IntentWriters<'w> {
    pub jump: EventWriter<'w, JumpIntent>,
    pub fire: EventWriter<'w, FireIntent>,
    pub pickup: EventWriter<'w, PickupIntent>,
    pub throw: EventWriter<'w, ThrowIntent>,
    pub movement: EventWriter<'w, MoveIntent>,
    pub look: EventWriter<'w, LookIntent>,
}

/// System: raw input → intents (player only)
pub fn dispatch_player_input(
    mut actions: EventReader<ActionInput>,
    mut axes: EventReader<AxisInput>,
    bindings: Res<InputBindings>,
    players: Query<Entity, (With<Player>, Without<Incapacitated>)>,
    mut writers: IntentWriters,
) {
    // Guard: no controllable player → drop this frame's input
    let Ok(agent) = players.single() else {
        actions.clear();
        axes.clear();
        return;
    };

    for input in actions.read() {
        for command in bindings.commands_for(input.action, input.edge) {
            match command {
                PlayerCommand::Jump => {
                    writers.jump.write(JumpIntent { agent });
                }
                PlayerCommand::Fire => {
                    writers.fire.write(FireIntent { shooter: agent });
                }
                PlayerCommand::PickupBomb => {
                    writers.pickup.write(PickupIntent { agent });
                }
                PlayerCommand::ThrowBomb => {
                    writers.throw.write(ThrowIntent { agent });
                }
            }
        }
    }

    for input in axes.read() {
        for (command, value) in bindings.axis_commands(input.axis, input.value) {
            match command {
                AxisCommand::MoveForward => {
                    writers.movement.write(MoveIntent {
                        agent,
                        axis: MoveAxis::Forward,
                        value,
                    });
                }
                AxisCommand::MoveRight => {
                    writers.movement.write(MoveIntent {
                        agent,
                        axis: MoveAxis::Right,
                        value,
                    });
                }
                AxisCommand::Turn => {
                    writers.look.write(LookIntent {
                        agent,
                        axis: LookAxis::Yaw,
                        value,
                    });
                }
                AxisCommand::LookUp => {
                    writers.look.write(LookIntent {
                        agent,
                        axis: LookAxis::Pitch,
                        value,
                    });
                }
            }
        }
    }
}
