//! Throwable bomb
//!
//! Lifecycle: lying around → picked up (fuse off) → thrown (fuse armed) →
//! explodes after `fuse_secs`: radial `TakeDamage { kind: Bomb }` to every
//! agent in the blast radius, then despawns.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::damage::{DamageKind, TakeDamage};
use crate::components::{Agent, PhysicsBody, ProbeShape, SurfaceMaterial};
use crate::config::BombConfig;
use crate::interaction::{Interactable, InteractableAttached, InteractableThrown};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Interactable)]
pub struct Bomb {
    pub fuse_secs: f32,
    pub blast_radius: f32,
    pub damage: f32,
    /// Seconds left on a lit fuse
    pub armed: Option<f32>,
    /// Last agent that threw it
    pub thrower: Option<Entity>,
}

impl Bomb {
    pub fn from_config(config: &BombConfig) -> Self {
        Self {
            fuse_secs: config.fuse_secs,
            blast_radius: config.blast_radius,
            damage: config.damage,
            armed: None,
            thrower: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn arm(&mut self, thrower: Entity) {
        self.armed = Some(self.fuse_secs);
        self.thrower = Some(thrower);
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Burn `delta` seconds of fuse. True when it just ran out.
    pub fn tick(&mut self, delta: f32) -> bool {
        let Some(remaining) = self.armed.as_mut() else {
            return false;
        };
        *remaining -= delta;
        *remaining <= 0.0
    }
}

/// Event: a bomb went off
#[derive(Event, Debug, Clone, Copy)]
pub struct BombExploded {
    pub bomb: Entity,
    pub location: Vec3,
    pub thrower: Option<Entity>,
    pub victims: usize,
}

/// Spawn an unarmed bomb resting at `position`
pub fn spawn_bomb(commands: &mut Commands, config: &BombConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Bomb::from_config(config),
            PhysicsBody::new(config.mass),
            ProbeShape::sphere(config.radius),
            SurfaceMaterial::Metal,
            // Rapier physics
            RigidBody::Dynamic,
            Collider::ball(config.radius),
            ColliderMassProperties::Mass(config.mass),
            Velocity::default(),
        ))
        .id()
}

/// Agents within `radius` of `center` (inclusive)
pub fn bomb_victims(
    center: Vec3,
    radius: f32,
    agents: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Vec<Entity> {
    agents
        .into_iter()
        .filter(|(_, position)| position.distance(center) <= radius)
        .map(|(entity, _)| entity)
        .collect()
}

/// System: throw lights the fuse, pickup puts it out
pub fn update_bomb_fuses(
    mut thrown: EventReader<InteractableThrown>,
    mut attached: EventReader<InteractableAttached>,
    mut bombs: Query<&mut Bomb>,
) {
    for event in attached.read() {
        if let Ok(mut bomb) = bombs.get_mut(event.object) {
            bomb.disarm();
        }
    }

    for event in thrown.read() {
        if let Ok(mut bomb) = bombs.get_mut(event.object) {
            bomb.arm(event.agent);
            crate::logger::log(&format!(
                "Bomb {:?} armed by {:?} ({:.1}s)",
                event.object, event.agent, bomb.fuse_secs
            ));
        }
    }
}

/// System: burn fuses, explode, despawn
pub fn tick_bomb_fuses(
    mut commands: Commands,
    time: Res<Time>,
    mut bombs: Query<(Entity, &Transform, &mut Bomb), Without<ChildOf>>,
    agents: Query<(Entity, &Transform), With<Agent>>,
    mut damage: EventWriter<TakeDamage>,
    mut exploded: EventWriter<BombExploded>,
) {
    let delta = time.delta_secs();

    for (entity, transform, mut bomb) in bombs.iter_mut() {
        if !bomb.tick(delta) {
            continue;
        }

        let location = transform.translation;
        let victims = bomb_victims(
            location,
            bomb.blast_radius,
            agents.iter().map(|(agent, agent_transform)| (agent, agent_transform.translation)),
        );

        for victim in &victims {
            damage.write(TakeDamage {
                damaged: *victim,
                amount: bomb.damage,
                kind: DamageKind::Bomb,
                instigator: bomb.thrower,
                causer: Some(entity),
            });
        }

        exploded.write(BombExploded {
            bomb: entity,
            location,
            thrower: bomb.thrower,
            victims: victims.len(),
        });

        crate::logger::log_info(&format!(
            "Bomb {:?} exploded at {:?}, {} agent(s) caught",
            entity,
            location,
            victims.len()
        ));

        commands.entity(entity).despawn();
    }
}
