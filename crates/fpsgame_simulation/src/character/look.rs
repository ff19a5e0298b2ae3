//! View control: yaw on the agent root, pitch on the camera
//!
//! Sign convention (input side):
//! - Turn > 0 → yaw right
//! - LookUp > 0 → pitch up

use bevy::prelude::*;

use crate::components::{Agent, CharacterRig, FirstPersonCamera, Incapacitated};
use crate::config::GameConfig;

/// Pitch never reaches straight up/down
pub const MAX_PITCH_DEG: f32 = 89.0;

/// Control rotation of the agent (radians)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ViewAngles {
    /// Positive = turned right
    pub yaw: f32,
    /// Positive = looking up, clamped to ±MAX_PITCH_DEG
    pub pitch: f32,
}

impl ViewAngles {
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw)
    }

    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }

    /// Full view rotation (body yaw then camera pitch)
    pub fn view_rotation(&self) -> Quat {
        self.body_rotation() * self.camera_rotation()
    }

    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw = (self.yaw + degrees.to_radians()).rem_euclid(std::f32::consts::TAU);
    }

    pub fn add_pitch(&mut self, degrees: f32) {
        let limit = MAX_PITCH_DEG.to_radians();
        self.pitch = (self.pitch + degrees.to_radians()).clamp(-limit, limit);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LookAxis {
    Yaw,
    Pitch,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LookIntent {
    pub agent: Entity,
    pub axis: LookAxis,
    pub value: f32,
}

/// System: LookIntent → ViewAngles → agent/camera rotations
pub fn apply_look_intents(
    mut intents: EventReader<LookIntent>,
    config: Res<GameConfig>,
    mut agents: Query<
        (&mut ViewAngles, &mut Transform, Option<&CharacterRig>),
        (With<Agent>, Without<Incapacitated>, Without<FirstPersonCamera>),
    >,
    mut cameras: Query<&mut Transform, (With<FirstPersonCamera>, Without<Agent>)>,
) {
    for intent in intents.read() {
        if intent.value == 0.0 || !intent.value.is_finite() {
            continue;
        }

        let Ok((mut angles, mut transform, rig)) = agents.get_mut(intent.agent) else {
            continue;
        };

        match intent.axis {
            LookAxis::Yaw => {
                angles.add_yaw(intent.value * config.character.turn_rate_deg);
                transform.rotation = angles.body_rotation();
            }
            LookAxis::Pitch => {
                angles.add_pitch(intent.value * config.character.look_rate_deg);
                if let Some(rig) = rig {
                    if let Ok(mut camera) = cameras.get_mut(rig.camera) {
                        camera.rotation = angles.camera_rotation();
                    }
                }
            }
        }
    }
}
