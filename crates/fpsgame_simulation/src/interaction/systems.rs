//! Pickup/throw systems
//!
//! Flow (all in one `Update` pass):
//! 1. PickupIntent → probe (headless or rapier) → ProbeResolved
//! 2. ProbeResolved → resolve_pickup → Holding + attach
//! 3. ThrowIntent → throw_held → Empty + detach + impulse

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::held::HeldInteractable;
use super::interactable::{
    attach_to_mount, release_from_mount, Interactable, InteractableAttached, InteractableThrown,
    PickupIntent, ThrowIntent,
};
use super::probe::{probe_candidates, ProbeCandidate, ProbeHit, ProbeRay};
use crate::components::{CharacterRig, Controller, GunMesh, PhysicsBody, ProbeShape, SurfaceMaterial};
use crate::config::GameConfig;
use crate::debug_draw::{DebugLines, GREEN};
use crate::math::align;
use crate::shared::{is_descendant_of, world_transform, HierarchyQuery};

/// Event: a pickup probe finished
#[derive(Event, Debug, Clone, Copy)]
pub struct ProbeResolved {
    pub agent: Entity,
    pub ray: ProbeRay,
    pub hit: Option<ProbeHit>,
}

/// Ray for a pickup attempt, None when the agent may not probe
///
/// Skipped (no cast at all) when:
/// - the agent is not driven by the local player (no viewpoint)
/// - the agent already holds something (second press is ignored)
/// - the rig/camera is missing
fn pickup_ray(
    agent: Entity,
    agents: &Query<(&Controller, &HeldInteractable, &CharacterRig)>,
    transforms: &HierarchyQuery,
    max_range: f32,
) -> Option<ProbeRay> {
    let (controller, held, rig) = agents.get(agent).ok()?;

    if !controller.is_local_player() {
        return None;
    }
    if !held.is_empty() {
        return None;
    }

    let view = world_transform(rig.camera, transforms)?;
    Some(ProbeRay::from_view(&view, max_range))
}

/// System: pickup probe, headless backend
pub fn probe_for_pickup_headless(
    mut intents: EventReader<PickupIntent>,
    config: Res<GameConfig>,
    agents: Query<(&Controller, &HeldInteractable, &CharacterRig)>,
    transforms: HierarchyQuery,
    shapes: Query<(Entity, &Transform, &ProbeShape, Option<&SurfaceMaterial>), Without<ChildOf>>,
    mut debug_lines: ResMut<DebugLines>,
    mut resolved: EventWriter<ProbeResolved>,
) {
    for intent in intents.read() {
        let Some(ray) = pickup_ray(intent.agent, &agents, &transforms, config.interaction.pickup_range)
        else {
            continue;
        };

        debug_lines.push(ray.origin, ray.end(), GREEN, config.interaction.debug_line_secs);

        let candidates = shapes.iter().map(|(entity, transform, shape, material)| ProbeCandidate {
            entity,
            center: transform.translation,
            radius: shape.radius,
            material: material.copied(),
        });
        let hit = probe_candidates(&ray, intent.agent, candidates);

        resolved.write(ProbeResolved {
            agent: intent.agent,
            ray,
            hit,
        });
    }
}

/// System: pickup probe, rapier backend
pub fn probe_for_pickup_rapier(
    mut intents: EventReader<PickupIntent>,
    config: Res<GameConfig>,
    agents: Query<(&Controller, &HeldInteractable, &CharacterRig)>,
    transforms: HierarchyQuery,
    parents: Query<&ChildOf>,
    materials: Query<&SurfaceMaterial>,
    rapier_context: ReadRapierContext,
    mut debug_lines: ResMut<DebugLines>,
    mut resolved: EventWriter<ProbeResolved>,
) {
    for intent in intents.read() {
        let agent = intent.agent;
        let Some(ray) = pickup_ray(agent, &agents, &transforms, config.interaction.pickup_range) else {
            continue;
        };

        debug_lines.push(ray.origin, ray.end(), GREEN, config.interaction.debug_line_secs);

        let hit = match rapier_context.single() {
            Ok(context) => {
                // Agent capsule and everything parented to it (rig, held object)
                let not_self = |entity: Entity| !is_descendant_of(entity, agent, &parents);
                let filter = QueryFilter::default()
                    .exclude_sensors()
                    .exclude_rigid_body(agent)
                    .predicate(&not_self);

                context
                    .cast_ray_and_get_normal(ray.origin, ray.direction, ray.max_range, true, filter)
                    .map(|(entity, intersection)| ProbeHit {
                        entity,
                        distance: intersection.time_of_impact,
                        point: intersection.point,
                        material: materials.get(entity).ok().copied(),
                    })
            }
            Err(err) => {
                crate::logger::log_warning(&format!("Pickup probe: no rapier context ({err})"));
                None
            }
        };

        resolved.write(ProbeResolved { agent, ray, hit });
    }
}

/// System: probe result → Holding(obj) + attach
pub fn resolve_pickup(
    mut commands: Commands,
    mut resolved: EventReader<ProbeResolved>,
    mut agents: Query<(&mut HeldInteractable, &CharacterRig)>,
    mut interactables: Query<(&mut Interactable, Option<&mut PhysicsBody>)>,
    guns: Query<&GunMesh>,
    mut attached: EventWriter<InteractableAttached>,
) {
    for result in resolved.read() {
        let Some(hit) = result.hit else {
            crate::logger::log(&format!("Pickup: nothing in range for {:?}", result.agent));
            continue;
        };

        // Not an interactable → stay Empty
        let Ok((mut interactable, body)) = interactables.get_mut(hit.entity) else {
            crate::logger::log(&format!("Pickup: {:?} is not interactable", hit.entity));
            continue;
        };

        let Ok((mut held, rig)) = agents.get_mut(result.agent) else {
            continue;
        };

        if !interactable.available_to(result.agent) {
            crate::logger::log(&format!(
                "Pickup: {:?} already held by {:?}",
                hit.entity, interactable.held_by
            ));
            continue;
        }

        let Ok(gun) = guns.get(rig.gun) else {
            crate::logger::log_warning(&format!("Pickup: {:?} has no gun mount", result.agent));
            continue;
        };

        if !held.try_hold(hit.entity) {
            continue;
        }

        interactable.held_by = Some(result.agent);
        if let Some(mut body) = body {
            body.freeze();
        }
        attach_to_mount(&mut commands, hit.entity, rig.gun, gun.hold_point);

        attached.write(InteractableAttached {
            object: hit.entity,
            agent: result.agent,
        });

        crate::logger::log_info(&format!(
            "Picked up {:?} at {:.0} units ({:?})",
            hit.entity, hit.distance, hit.material
        ));
    }
}

/// System: ThrowIntent → Empty + detach + impulse along the camera forward
///
/// The reference is dropped first. If the object no longer exists nothing
/// else happens.
pub fn throw_held(
    mut commands: Commands,
    mut intents: EventReader<ThrowIntent>,
    config: Res<GameConfig>,
    mut agents: Query<(&mut HeldInteractable, &CharacterRig)>,
    transforms: HierarchyQuery,
    mut interactables: Query<(&mut Interactable, Option<&mut PhysicsBody>)>,
    mut thrown: EventWriter<InteractableThrown>,
) {
    for intent in intents.read() {
        let Ok((mut held, rig)) = agents.get_mut(intent.agent) else {
            continue;
        };

        let Some(object) = held.take() else {
            continue;
        };

        let Ok((mut interactable, body)) = interactables.get_mut(object) else {
            crate::logger::log(&format!("Throw: held object {:?} is gone", object));
            continue;
        };
        interactable.held_by = None;

        let direction = world_transform(rig.camera, &transforms)
            .map(|view| *view.forward())
            .unwrap_or(Vec3::NEG_Z);
        let impulse = direction * config.interaction.throw_impulse;

        let mut pose = world_transform(object, &transforms).unwrap_or_default();
        pose.rotation = align(pose.rotation, direction);

        if let Some(mut body) = body {
            body.simulating = true;
            body.velocity = Vec3::ZERO;
            body.apply_impulse(impulse);
        }
        release_from_mount(&mut commands, object, pose, impulse);

        thrown.write(InteractableThrown {
            object,
            agent: intent.agent,
            direction,
            impulse,
        });

        crate::logger::log_info(&format!("Threw {:?} along {:?}", object, direction));
    }
}
