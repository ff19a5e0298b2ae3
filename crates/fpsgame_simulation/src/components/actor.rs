//! Base agent components: Agent, Controller, PhysicsBody, Incapacitated

use bevy::prelude::*;

use crate::character::{KinematicController, PendingMovement, ViewAngles};
use crate::interaction::HeldInteractable;

/// Controllable character (player or AI-driven)
///
/// Required Components give every agent a body, a movement accumulator,
/// view angles and an (empty) held-object slot.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    Controller,
    PhysicsBody,
    KinematicController,
    PendingMovement,
    ViewAngles,
    HeldInteractable
)]
pub struct Agent;

/// Who drives the agent
///
/// Only `LocalPlayer` has a viewpoint the interaction probe can use.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum Controller {
    #[default]
    Unpossessed,
    LocalPlayer,
    Ai,
}

impl Controller {
    pub fn is_local_player(&self) -> bool {
        matches!(self, Controller::LocalPlayer)
    }
}

/// Velocity + mass of a body we integrate ourselves (headless backend)
///
/// `simulating == false` freezes the body: no gravity, no integration,
/// impulses are ignored.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
    pub simulating: bool,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 70.0,
            simulating: true,
        }
    }
}

impl PhysicsBody {
    pub fn new(mass: f32) -> Self {
        Self { mass, ..default() }
    }

    /// Instant velocity change, Δv = J / m
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if !self.simulating || self.mass <= 0.0 {
            return;
        }
        self.velocity += impulse / self.mass;
    }

    pub fn freeze(&mut self) {
        self.simulating = false;
        self.velocity = Vec3::ZERO;
    }
}

/// Marker: agent took bomb damage
///
/// Terminal: physics disabled, input ignored, no recovery.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Incapacitated;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_divides_by_mass() {
        let mut body = PhysicsBody::new(2.0);
        body.apply_impulse(Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(body.velocity, Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_frozen_body_ignores_impulse() {
        let mut body = PhysicsBody::new(1.0);
        body.velocity = Vec3::X;
        body.freeze();

        body.apply_impulse(Vec3::Y * 100.0);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert!(!body.simulating);
    }

    #[test]
    fn test_only_local_player_can_probe() {
        assert!(Controller::LocalPlayer.is_local_player());
        assert!(!Controller::Ai.is_local_player());
        assert!(!Controller::default().is_local_player());
    }
}
