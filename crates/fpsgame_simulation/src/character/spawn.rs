//! Character spawn helpers
//!
//! Builds the whole first-person rig in one go: capsule root, camera at eye
//! height, arms mesh, gun mesh with muzzle and hold sockets. The root keeps
//! the child ids in `CharacterRig`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::movement::KinematicController;
use crate::combat::WeaponLoadout;
use crate::components::{
    Agent, AnimInstance, ArmsMesh, CharacterRig, Controller, FirstPersonCamera, GunMesh,
    PhysicsBody, Player, ProbeShape, SurfaceMaterial,
};
use crate::config::GameConfig;

/// Spawn the local player at `position`
pub fn spawn_player_character(commands: &mut Commands, config: &GameConfig, position: Vec3) -> Entity {
    let agent = spawn_character(commands, config, position, Controller::LocalPlayer);
    commands.entity(agent).insert(Player);
    agent
}

/// Spawn a character with the given controller (AI agents, remote pawns, ...)
pub fn spawn_character(
    commands: &mut Commands,
    config: &GameConfig,
    position: Vec3,
    controller: Controller,
) -> Entity {
    let character = &config.character;
    let rig = &config.rig;

    let agent = commands
        .spawn((
            Transform::from_translation(position),
            Agent,
            controller,
            PhysicsBody::default(),
            KinematicController::from_config(character),
            WeaponLoadout::from_config(&config.weapon),
            // Headless queries see the capsule as a sphere of its radius
            ProbeShape::sphere(character.capsule_radius),
            SurfaceMaterial::Flesh,
            // Rapier physics
            RigidBody::KinematicVelocityBased,
            Collider::capsule_y(
                (character.capsule_half_height - character.capsule_radius).max(0.0),
                character.capsule_radius,
            ),
            Velocity::default(),
        ))
        .id();

    let camera = commands
        .spawn((
            FirstPersonCamera,
            Transform::from_xyz(0.0, character.eye_height, 0.0),
            ChildOf(agent),
        ))
        .id();

    let arms = commands
        .spawn((
            ArmsMesh,
            AnimInstance::default(),
            rig.arms_transform(),
            ChildOf(camera),
        ))
        .id();

    let gun = commands
        .spawn((
            GunMesh {
                muzzle: rig.muzzle_transform(),
                hold_point: rig.hold_transform(),
            },
            rig.grip_transform(),
            ChildOf(arms),
        ))
        .id();

    commands.entity(agent).insert(CharacterRig { camera, arms, gun });

    crate::logger::log(&format!(
        "Spawned character {:?} ({:?}) at {:?}",
        agent, controller, position
    ));

    agent
}
