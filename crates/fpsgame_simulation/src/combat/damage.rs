//! Damage notifications and bomb incapacitation
//!
//! Agents have no health pool: every hit is logged, bomb damage is terminal.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::character::PendingMovement;
use crate::components::{Agent, Incapacitated, PhysicsBody};

/// Damage class carried by a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DamageKind {
    Physical,
    Fire,
    Ice,
    Electric,
    Bomb,
}

impl DamageKind {
    /// Kinds that take the agent out for good
    pub fn incapacitates(&self) -> bool {
        matches!(self, DamageKind::Bomb)
    }
}

/// Incoming: `damaged` takes `amount` of `kind`
#[derive(Event, Debug, Clone, Copy)]
pub struct TakeDamage {
    pub damaged: Entity,
    pub amount: f32,
    pub kind: DamageKind,
    /// Who is responsible (thrower, shooter)
    pub instigator: Option<Entity>,
    /// What dealt it (bomb, projectile)
    pub causer: Option<Entity>,
}

/// Event: an agent entered the terminal Incapacitated state
#[derive(Event, Debug, Clone, Copy)]
pub struct AgentIncapacitated {
    pub agent: Entity,
    pub instigator: Option<Entity>,
}

/// System: log every hit, incapacitate on bomb damage
pub fn receive_damage(
    mut commands: Commands,
    mut events: EventReader<TakeDamage>,
    mut agents: Query<(&mut PhysicsBody, &mut PendingMovement, Has<Incapacitated>), With<Agent>>,
    mut incapacitated: EventWriter<AgentIncapacitated>,
) {
    // Two bombs in one frame incapacitate once
    let mut handled: Vec<Entity> = Vec::new();

    for event in events.read() {
        crate::logger::log(&format!("Damage Received - {}", event.amount));

        if !event.kind.incapacitates() {
            continue;
        }

        let Ok((mut body, mut pending, already)) = agents.get_mut(event.damaged) else {
            continue;
        };
        if already || handled.contains(&event.damaged) {
            continue;
        }
        handled.push(event.damaged);

        body.freeze();
        pending.clear();
        commands
            .entity(event.damaged)
            .insert((Incapacitated, RigidBodyDisabled));

        incapacitated.write(AgentIncapacitated {
            agent: event.damaged,
            instigator: event.instigator,
        });

        crate::logger::log_warning(&format!("{:?} incapacitated by bomb", event.damaged));
    }
}
