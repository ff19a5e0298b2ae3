//! Interactable objects: anything an agent can pick up and throw
//!
//! The world owns the object. An agent only keeps its id in
//! `HeldInteractable`; the object records who holds it in `held_by`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::PhysicsBody;

/// Pick-up-able object
///
/// Invariant: `held_by` names at most one agent, and that agent's
/// `HeldInteractable` is `Holding(this)`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform, PhysicsBody)]
pub struct Interactable {
    pub held_by: Option<Entity>,
}

impl Interactable {
    pub fn is_held(&self) -> bool {
        self.held_by.is_some()
    }

    /// Free, or already held by `agent`
    pub fn available_to(&self, agent: Entity) -> bool {
        self.held_by.is_none_or(|holder| holder == agent)
    }
}

/// Intent: pick up whatever the probe finds (SpawnBomb pressed)
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupIntent {
    pub agent: Entity,
}

/// Intent: throw the held object (SpawnBomb released)
#[derive(Event, Debug, Clone, Copy)]
pub struct ThrowIntent {
    pub agent: Entity,
}

/// Event: object attached to an agent's weapon mount
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractableAttached {
    pub object: Entity,
    pub agent: Entity,
}

/// Event: object released by an agent with an impulse
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractableThrown {
    pub object: Entity,
    pub agent: Entity,
    pub direction: Vec3,
    pub impulse: Vec3,
}

/// Parent `object` under `mount` at `hold_point`, physics off
pub fn attach_to_mount(commands: &mut Commands, object: Entity, mount: Entity, hold_point: Transform) {
    let Ok(mut entity_commands) = commands.get_entity(object) else {
        return;
    };
    entity_commands.insert((ChildOf(mount), hold_point, RigidBodyDisabled));
}

/// Unparent `object` at `world_pose`, physics back on, push with `impulse`
pub fn release_from_mount(commands: &mut Commands, object: Entity, world_pose: Transform, impulse: Vec3) {
    let Ok(mut entity_commands) = commands.get_entity(object) else {
        return;
    };
    entity_commands
        .remove::<(ChildOf, RigidBodyDisabled)>()
        .insert((
            world_pose,
            ExternalImpulse {
                impulse,
                torque_impulse: Vec3::ZERO,
            },
        ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability() {
        let me = Entity::from_raw(1);
        let other = Entity::from_raw(2);

        assert!(Interactable::default().available_to(me));
        assert!(Interactable { held_by: Some(me) }.available_to(me));
        assert!(!Interactable { held_by: Some(other) }.available_to(me));
    }
}
