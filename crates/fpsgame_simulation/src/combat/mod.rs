//! Combat: firing, projectiles, bombs, damage
//!
//! - weapon: loadout + fire action (projectile, sound, montage)
//! - spawn_policy: where a projectile may appear
//! - projectile: ballistic flight (headless) + lifetime
//! - bomb: fuse armed on throw, radial damage on explosion
//! - damage: `TakeDamage` intake, bomb incapacitation
//!
//! Order inside a frame:
//! 1. `GameplaySet::Combat` fire_weapon → step_projectiles → expire
//! 2. `GameplaySet::Damage` bomb fuses (after interaction) → receive_damage

use bevy::prelude::*;

pub mod bomb;
pub mod damage;
pub mod projectile;
pub mod spawn_policy;
pub mod weapon;

pub use bomb::{bomb_victims, spawn_bomb, tick_bomb_fuses, update_bomb_fuses, Bomb, BombExploded};
pub use damage::{receive_damage, AgentIncapacitated, DamageKind, TakeDamage};
pub use projectile::{
    expire_projectiles, spawn_projectile, step_projectiles_headless, Projectile,
    ProjectileArchetype, ProjectileHit,
};
pub use spawn_policy::{resolve_spawn_location, Blocker, SpawnCollisionPolicy};
pub use weapon::{
    fire_weapon, AnimationMontage, FireIntent, PlayMontage, PlaySoundAtLocation, SoundCue,
    WeaponFired, WeaponLoadout, ARMS_SLOT,
};

use crate::config::headless_physics;
use crate::GameplaySet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireIntent>()
            .add_event::<WeaponFired>()
            .add_event::<PlaySoundAtLocation>()
            .add_event::<PlayMontage>()
            .add_event::<ProjectileHit>()
            .add_event::<TakeDamage>()
            .add_event::<AgentIncapacitated>()
            .add_event::<BombExploded>();

        app.add_systems(
            Update,
            (
                fire_weapon,
                step_projectiles_headless.run_if(headless_physics),
                expire_projectiles,
            )
                .chain()
                .in_set(GameplaySet::Combat),
        );

        app.add_systems(
            Update,
            (update_bomb_fuses, tick_bomb_fuses, receive_damage)
                .chain()
                .in_set(GameplaySet::Damage),
        );
    }
}

#[cfg(test)]
mod bomb_tests;
#[cfg(test)]
mod damage_tests;
