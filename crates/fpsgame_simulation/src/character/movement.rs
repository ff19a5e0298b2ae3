//! Kinematic character controller
//!
//! Архитектура:
//! - Input systems (перед fixed loop) копят requested movement в `PendingMovement`
//! - FixedUpdate превращает его в `PhysicsBody.velocity` (walk speed, gravity, jump)
//! - После fixed loop `PendingMovement` очищается, если хоть один fixed step прошёл
//! - Headless backend сам интегрирует velocity в `Transform`
//! - Rapier backend отдаёт velocity kinematic rigid body
//!
//! Floor is the plane y = 0; a standing capsule centre sits at `floor_height`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{Agent, Incapacitated, PhysicsBody};
use crate::config::CharacterConfig;

/// Kinematic controller component
///
/// Velocity считаем сами, Rapier видит только результат.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    /// Walk speed (units/s)
    pub move_speed: f32,
    /// Gravity (units/s², negative = down)
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Capsule centre height when standing on the floor
    pub floor_height: f32,
    pub grounded: bool,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self::from_config(&CharacterConfig::default())
    }
}

impl KinematicController {
    pub fn from_config(config: &CharacterConfig) -> Self {
        Self {
            move_speed: config.walk_speed,
            gravity: config.gravity,
            jump_velocity: config.jump_velocity,
            floor_height: config.capsule_half_height,
            grounded: false,
        }
    }
}

/// Movement requested this frame (world space, not normalized)
///
/// Filled before the fixed loop, read by every fixed step of that frame,
/// cleared after the loop. A frame without fixed steps carries it over.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PendingMovement {
    pub vector: Vec3,
    /// Non-zero movement requests received this frame
    pub requests: u32,
}

impl PendingMovement {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum MoveAxis {
    Forward,
    Right,
}

/// Intent: move along the agent's forward/right axis, scaled by `value`
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveIntent {
    pub agent: Entity,
    pub axis: MoveAxis,
    pub value: f32,
}

/// Intent: jump (only when grounded)
#[derive(Event, Debug, Clone, Copy)]
pub struct JumpIntent {
    pub agent: Entity,
}

/// Adds `direction * scale` to the pending movement
///
/// A zero scale is not a request: nothing is recorded.
pub fn add_movement_input(pending: &mut PendingMovement, direction: Vec3, scale: f32) {
    if scale == 0.0 || !scale.is_finite() {
        return;
    }
    pending.vector += direction * scale;
    pending.requests += 1;
}

/// Set when at least one fixed step ran this frame
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FixedStepRan(pub bool);

/// System (PreUpdate): reset the flag
pub fn reset_fixed_step_flag(mut ran: ResMut<FixedStepRan>) {
    ran.0 = false;
}

/// System (FixedPreUpdate): mark that a fixed step ran
pub fn mark_fixed_step(mut ran: ResMut<FixedStepRan>) {
    ran.0 = true;
}

/// Run condition: the fixed loop consumed this frame's input
pub fn fixed_step_ran(ran: Res<FixedStepRan>) -> bool {
    ran.0
}

/// System: after the fixed loop, forget consumed movement
pub fn clear_pending_movement(mut query: Query<&mut PendingMovement>) {
    for mut pending in query.iter_mut() {
        if pending.requests > 0 || pending.vector != Vec3::ZERO {
            pending.clear();
        }
    }
}

/// System: MoveIntent → PendingMovement along actor forward/right
pub fn apply_move_intents(
    mut intents: EventReader<MoveIntent>,
    mut agents: Query<(&Transform, &mut PendingMovement), (With<Agent>, Without<Incapacitated>)>,
) {
    for intent in intents.read() {
        let Ok((transform, mut pending)) = agents.get_mut(intent.agent) else {
            continue;
        };

        let direction = match intent.axis {
            MoveAxis::Forward => transform.forward(),
            MoveAxis::Right => transform.right(),
        };
        add_movement_input(&mut pending, *direction, intent.value);
    }
}

/// System: JumpIntent → vertical velocity (grounded only)
pub fn apply_jump_intents(
    mut intents: EventReader<JumpIntent>,
    mut agents: Query<(&mut KinematicController, &mut PhysicsBody), Without<Incapacitated>>,
) {
    for intent in intents.read() {
        let Ok((mut controller, mut body)) = agents.get_mut(intent.agent) else {
            continue;
        };

        if !controller.grounded || !body.simulating {
            continue;
        }

        body.velocity.y = controller.jump_velocity;
        controller.grounded = false;
    }
}

/// System: grounded if the capsule rests on the floor and is not rising
pub fn ground_detection(mut query: Query<(&Transform, &PhysicsBody, &mut KinematicController)>) {
    for (transform, body, mut controller) in query.iter_mut() {
        // Small slack for numerical error
        controller.grounded =
            transform.translation.y <= controller.floor_height + 0.5 && body.velocity.y <= 0.0;
    }
}

/// System: PendingMovement → horizontal velocity
pub fn apply_movement_input(
    mut query: Query<(&KinematicController, &PendingMovement, &mut PhysicsBody)>,
) {
    for (controller, pending, mut body) in query.iter_mut() {
        if !body.simulating {
            continue;
        }

        let horizontal = Vec3::new(pending.vector.x, 0.0, pending.vector.z).clamp_length_max(1.0);
        body.velocity.x = horizontal.x * controller.move_speed;
        body.velocity.z = horizontal.z * controller.move_speed;
    }
}

/// System: gravity while airborne
pub fn apply_gravity(
    mut query: Query<(&KinematicController, &mut PhysicsBody)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (controller, mut body) in query.iter_mut() {
        if body.simulating && !controller.grounded {
            body.velocity.y += controller.gravity * delta;
        }
    }
}

/// System (headless): position += velocity * dt, then clamp to the floor
pub fn integrate_velocity_to_transform(
    mut query: Query<(&KinematicController, &mut PhysicsBody, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (controller, mut body, mut transform) in query.iter_mut() {
        if !body.simulating {
            continue;
        }

        transform.translation += body.velocity * delta;

        if transform.translation.y < controller.floor_height {
            transform.translation.y = controller.floor_height;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }
}

/// System (rapier): our velocity → rapier kinematic body
pub fn sync_velocity_to_rapier(
    mut query: Query<(&PhysicsBody, &mut Velocity), With<KinematicController>>,
) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = if body.simulating { body.velocity } else { Vec3::ZERO };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_scale_records_nothing() {
        let mut pending = PendingMovement::default();
        add_movement_input(&mut pending, Vec3::NEG_Z, 0.0);

        assert_eq!(pending.requests, 0);
        assert_eq!(pending.vector, Vec3::ZERO);
    }

    #[test]
    fn test_nonzero_scale_is_proportional() {
        let mut pending = PendingMovement::default();
        add_movement_input(&mut pending, Vec3::NEG_Z, 0.5);

        assert_eq!(pending.requests, 1);
        assert_eq!(pending.vector, Vec3::new(0.0, 0.0, -0.5));

        add_movement_input(&mut pending, Vec3::X, -1.0);
        assert_eq!(pending.requests, 2);
        assert_eq!(pending.vector, Vec3::new(-1.0, 0.0, -0.5));
    }

    #[test]
    fn test_nan_scale_ignored() {
        let mut pending = PendingMovement::default();
        add_movement_input(&mut pending, Vec3::X, f32::NAN);
        assert_eq!(pending.requests, 0);
    }

    #[test]
    fn test_controller_from_config() {
        let config = CharacterConfig::default();
        let controller = KinematicController::from_config(&config);

        assert_eq!(controller.move_speed, 600.0);
        assert_eq!(controller.floor_height, config.capsule_half_height);
        assert!(!controller.grounded);
    }
}
