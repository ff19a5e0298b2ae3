//! Free bodies (headless backend)
//!
//! Thrown objects, bombs, anything with a `PhysicsBody` but no
//! `KinematicController`. Gravity + explicit Euler, resting on the floor
//! plane (y = 0) at their `ProbeShape` radius. Held objects are skipped.
//!
//! With the Rapier backend these bodies are `RigidBody::Dynamic` and the
//! solver owns them.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;

use crate::character::KinematicController;
use crate::components::{PhysicsBody, ProbeShape};
use crate::config::{headless_physics, GameConfig};

/// Below this speed a body touching the floor comes to rest (units/s)
const REST_SPEED: f32 = 1.0;

/// Ground contact keeps this fraction of horizontal speed per step
const FLOOR_FRICTION: f32 = 0.8;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            integrate_free_bodies
                .run_if(headless_physics)
                .before(PhysicsSet::SyncBackend),
        );
    }
}

/// One explicit Euler step of a free body, returns true if it touched the floor
pub fn step_free_body(
    body: &mut PhysicsBody,
    translation: &mut Vec3,
    rest_height: f32,
    gravity: f32,
    delta: f32,
) -> bool {
    body.velocity.y += gravity * delta;
    *translation += body.velocity * delta;

    if translation.y > rest_height {
        return false;
    }

    translation.y = rest_height;
    body.velocity.y = 0.0;
    body.velocity.x *= FLOOR_FRICTION;
    body.velocity.z *= FLOOR_FRICTION;
    if body.velocity.length() < REST_SPEED {
        body.velocity = Vec3::ZERO;
    }
    true
}

/// System: gravity + integration for simulating free bodies
pub fn integrate_free_bodies(
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut bodies: Query<
        (&mut PhysicsBody, &mut Transform, Option<&ProbeShape>),
        (Without<KinematicController>, Without<ChildOf>),
    >,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (mut body, mut transform, shape) in bodies.iter_mut() {
        if !body.simulating {
            continue;
        }

        let rest_height = shape.map_or(0.0, |shape| shape.radius);
        step_free_body(
            &mut body,
            &mut transform.translation,
            rest_height,
            config.character.gravity,
            delta,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gravity_pulls_airborne_body() {
        let mut body = PhysicsBody::new(1.0);
        let mut position = Vec3::new(0.0, 500.0, 0.0);

        let landed = step_free_body(&mut body, &mut position, 20.0, -980.0, 0.1);

        assert!(!landed);
        assert_relative_eq!(body.velocity.y, -98.0, epsilon = 1e-3);
        assert_relative_eq!(position.y, 500.0 - 9.8, epsilon = 1e-3);
    }

    #[test]
    fn test_body_rests_on_floor() {
        let mut body = PhysicsBody::new(1.0);
        body.velocity = Vec3::new(0.5, -300.0, 0.0);
        let mut position = Vec3::new(0.0, 21.0, 0.0);

        let landed = step_free_body(&mut body, &mut position, 20.0, -980.0, 1.0 / 60.0);

        assert!(landed);
        assert_eq!(position.y, 20.0);
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_thrown_body_keeps_flying() {
        let mut body = PhysicsBody::new(1.0);
        body.apply_impulse(Vec3::new(0.0, 0.0, -1500.0));
        let mut position = Vec3::new(0.0, 150.0, 0.0);

        step_free_body(&mut body, &mut position, 20.0, -980.0, 1.0 / 60.0);

        assert!(position.z < -20.0);
        assert!(position.y < 150.0);
    }
}
