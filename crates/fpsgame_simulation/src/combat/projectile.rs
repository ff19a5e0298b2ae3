//! Projectiles fired from the muzzle
//!
//! Headless backend: ballistic step against root `ProbeShape`s (swept ray
//! over the frame's travel). The first hit pushes a simulating body and
//! damages an agent, then the projectile despawns. Rapier backend: the solver
//! moves it and resolves contacts; only the lifetime is ours.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::damage::{DamageKind, TakeDamage};
use crate::character::KinematicController;
use crate::components::{Agent, PhysicsBody, ProbeShape, SurfaceMaterial};
use crate::config::{GameConfig, ProjectileConfig};
use crate::interaction::{probe_candidates, ProbeCandidate, ProbeRay};

/// What a weapon spawns on fire
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ProjectileArchetype {
    pub speed: f32,
    pub lifetime_secs: f32,
    pub radius: f32,
    pub impulse: f32,
    pub damage: f32,
}

impl ProjectileArchetype {
    pub fn from_config(config: &ProjectileConfig) -> Self {
        Self {
            speed: config.speed,
            lifetime_secs: config.lifetime_secs,
            radius: config.radius,
            impulse: config.impulse,
            damage: config.damage,
        }
    }
}

/// Projectile in flight
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Projectile {
    pub shooter: Entity,
    pub velocity: Vec3,
    /// Seconds until despawn
    pub remaining: f32,
    pub radius: f32,
    pub impulse: f32,
    pub damage: f32,
}

/// Event: a projectile struck something
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub shooter: Entity,
    pub target: Entity,
    pub point: Vec3,
    pub material: Option<SurfaceMaterial>,
}

/// Spawn a projectile flying along `pose`'s forward
pub fn spawn_projectile(
    commands: &mut Commands,
    archetype: &ProjectileArchetype,
    shooter: Entity,
    pose: Transform,
) -> Entity {
    let velocity = *pose.forward() * archetype.speed;

    commands
        .spawn((
            pose,
            Projectile {
                shooter,
                velocity,
                remaining: archetype.lifetime_secs,
                radius: archetype.radius,
                impulse: archetype.impulse,
                damage: archetype.damage,
            },
            // Rapier physics
            RigidBody::Dynamic,
            Collider::ball(archetype.radius),
            Velocity::linear(velocity),
            Ccd::enabled(),
        ))
        .id()
}

/// System: headless ballistic step + first-hit resolution
pub fn step_projectiles_headless(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    shapes: Query<
        (Entity, &Transform, &ProbeShape, Option<&SurfaceMaterial>),
        (Without<ChildOf>, Without<Projectile>),
    >,
    mut bodies: Query<&mut PhysicsBody, Without<KinematicController>>,
    agents: Query<(), With<Agent>>,
    mut hits: EventWriter<ProjectileHit>,
    mut damage: EventWriter<TakeDamage>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (entity, mut transform, mut projectile) in projectiles.iter_mut() {
        projectile.velocity.y += config.character.gravity * delta;

        let travel = projectile.velocity * delta;
        let Some(ray) = ProbeRay::new(transform.translation, travel, travel.length()) else {
            continue;
        };
        let candidates = shapes.iter().map(|(target, shape_transform, shape, material)| ProbeCandidate {
            entity: target,
            center: shape_transform.translation,
            // Swept sphere against sphere
            radius: shape.radius + projectile.radius,
            material: material.copied(),
        });

        let Some(hit) = probe_candidates(&ray, projectile.shooter, candidates) else {
            transform.translation += travel;
            continue;
        };

        if let Ok(mut body) = bodies.get_mut(hit.entity) {
            let push = projectile.velocity.normalize_or_zero() * projectile.impulse;
            body.apply_impulse(push);
        }

        if agents.contains(hit.entity) && projectile.damage > 0.0 {
            damage.write(TakeDamage {
                damaged: hit.entity,
                amount: projectile.damage,
                kind: DamageKind::Physical,
                instigator: Some(projectile.shooter),
                causer: Some(entity),
            });
        }

        hits.write(ProjectileHit {
            projectile: entity,
            shooter: projectile.shooter,
            target: hit.entity,
            point: hit.point,
            material: hit.material,
        });

        crate::logger::log(&format!(
            "Projectile {:?} hit {:?} ({:?})",
            entity, hit.entity, hit.material
        ));

        commands.entity(entity).despawn();
    }
}

/// System: despawn projectiles whose lifetime ran out (both backends)
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut Projectile)>,
) {
    for (entity, mut projectile) in projectiles.iter_mut() {
        projectile.remaining -= time.delta_secs();
        if projectile.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
