//! Weapon loadout and the fire action
//!
//! Fire produces up to three independent effects:
//! - projectile spawned at the muzzle (if an archetype is configured)
//! - `PlaySoundAtLocation` at the agent (if a cue is configured)
//! - `PlayMontage` on the arms (if a montage is configured AND the arms
//!   have an `AnimInstance`)
//!
//! A missing part skips only that effect.

use bevy::prelude::*;

use super::projectile::{spawn_projectile, Projectile, ProjectileArchetype};
use super::spawn_policy::{resolve_spawn_location, Blocker, SpawnCollisionPolicy};
use crate::components::{AnimInstance, CharacterRig, GunMesh, Incapacitated, ProbeShape};
use crate::config::WeaponConfig;
use crate::shared::{world_transform, HierarchyQuery};

/// Montage slot driven by the first-person arms
pub const ARMS_SLOT: &str = "Arms";

/// Sound asset handle (path-like id, resolved by the audio host)
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct SoundCue(pub String);

/// Animation montage asset id (resolved by the animation host)
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct AnimationMontage(pub String);

/// What firing does for this agent
///
/// Every part is optional; `Default` is an empty loadout that fires nothing.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct WeaponLoadout {
    pub projectile: Option<ProjectileArchetype>,
    pub fire_sound: Option<SoundCue>,
    pub fire_animation: Option<AnimationMontage>,
    pub spawn_policy: SpawnCollisionPolicy,
}

impl WeaponLoadout {
    pub fn from_config(config: &WeaponConfig) -> Self {
        Self {
            projectile: config.projectile.as_ref().map(ProjectileArchetype::from_config),
            fire_sound: config.fire_sound.clone().map(SoundCue),
            fire_animation: config.fire_animation.clone().map(AnimationMontage),
            spawn_policy: SpawnCollisionPolicy::AdjustIfPossibleButAlwaysSpawn,
        }
    }
}

/// Intent: fire the current weapon (Fire pressed)
#[derive(Event, Debug, Clone, Copy)]
pub struct FireIntent {
    pub shooter: Entity,
}

/// Outgoing: play a one-shot sound in the world
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlaySoundAtLocation {
    pub cue: SoundCue,
    pub location: Vec3,
    pub source: Entity,
}

/// Outgoing: play a montage on a skeletal mesh
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayMontage {
    pub mesh: Entity,
    pub montage: AnimationMontage,
    pub slot: &'static str,
    pub blend_in: f32,
}

/// Event: a projectile left the muzzle
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub projectile: Entity,
    pub location: Vec3,
}

/// System: FireIntent → projectile + sound + montage
pub fn fire_weapon(
    mut commands: Commands,
    mut intents: EventReader<FireIntent>,
    shooters: Query<(&WeaponLoadout, &CharacterRig), Without<Incapacitated>>,
    guns: Query<&GunMesh>,
    transforms: HierarchyQuery,
    blockers: Query<(Entity, &Transform, &ProbeShape), (Without<ChildOf>, Without<Projectile>)>,
    mut anim_instances: Query<&mut AnimInstance>,
    mut sounds: EventWriter<PlaySoundAtLocation>,
    mut montages: EventWriter<PlayMontage>,
    mut fired: EventWriter<WeaponFired>,
) {
    for intent in intents.read() {
        let shooter = intent.shooter;
        let Ok((loadout, rig)) = shooters.get(shooter) else {
            continue;
        };

        if let Some(archetype) = &loadout.projectile {
            let muzzle = guns
                .get(rig.gun)
                .ok()
                .and_then(|gun| world_transform(rig.gun, &transforms).map(|pose| pose * gun.muzzle));

            match muzzle {
                Some(muzzle) => {
                    let nearby: Vec<Blocker> = blockers
                        .iter()
                        .filter(|(entity, _, _)| *entity != shooter)
                        .map(|(_, transform, shape)| Blocker {
                            center: transform.translation,
                            radius: shape.radius,
                        })
                        .collect();

                    if let Some(location) = resolve_spawn_location(
                        loadout.spawn_policy,
                        muzzle.translation,
                        archetype.radius,
                        &nearby,
                    ) {
                        let pose = Transform::from_translation(location).with_rotation(muzzle.rotation);
                        let projectile = spawn_projectile(&mut commands, archetype, shooter, pose);
                        fired.write(WeaponFired {
                            shooter,
                            projectile,
                            location,
                        });
                    } else {
                        crate::logger::log(&format!("Fire: muzzle of {:?} is blocked", shooter));
                    }
                }
                None => {
                    crate::logger::log_warning(&format!("Fire: {:?} has no muzzle", shooter));
                }
            }
        }

        if let Some(cue) = &loadout.fire_sound {
            let location = world_transform(shooter, &transforms)
                .map(|pose| pose.translation)
                .unwrap_or_default();
            sounds.write(PlaySoundAtLocation {
                cue: cue.clone(),
                location,
                source: shooter,
            });
        }

        if let Some(montage) = &loadout.fire_animation {
            // Arms without an animation instance cannot play montages
            if let Ok(mut anim) = anim_instances.get_mut(rig.arms) {
                anim.last_montage = Some(montage.0.clone());
                montages.write(PlayMontage {
                    mesh: rig.arms,
                    montage: montage.clone(),
                    slot: ARMS_SLOT,
                    blend_in: 0.0,
                });
            }
        }
    }
}
