//! Game configuration (Resource)
//!
//! Every tunable of the controller, the interaction probe, the weapon and the
//! game mode lives here. `Default` matches the shipped game; JSON overrides
//! go through `GameConfig::from_json_str` (missing fields fall back to the
//! defaults).
//!
//! Units: centimetres and seconds, same as the content the numbers came from.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pickup probe length (distance units)
pub const PICKUP_RANGE: f32 = 300.0;

/// How long the probe debug line stays visible (seconds)
pub const PROBE_DEBUG_LINE_SECS: f32 = 2.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which world answers ray queries and integrates thrown bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicsBackend {
    /// Analytic ray/sphere tests against `ProbeShape` + our own integration
    #[default]
    Headless,
    /// Rapier context queries + `ExternalImpulse`
    Rapier,
}

/// Run condition: headless backend selected
pub fn headless_physics(config: Res<GameConfig>) -> bool {
    config.physics == PhysicsBackend::Headless
}

/// Run condition: rapier backend selected
pub fn rapier_physics(config: Res<GameConfig>) -> bool {
    config.physics == PhysicsBackend::Rapier
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsBackend,
    pub character: CharacterConfig,
    pub interaction: InteractionConfig,
    pub rig: RigConfig,
    pub weapon: WeaponConfig,
    pub bomb: BombConfig,
    pub game_mode: GameModeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsBackend::Headless,
            character: CharacterConfig::default(),
            interaction: InteractionConfig::default(),
            rig: RigConfig::default(),
            weapon: WeaponConfig::default(),
            bomb: BombConfig::default(),
            game_mode: GameModeConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse + validate. Fields absent from the JSON keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("interaction.pickup_range", self.interaction.pickup_range)?;
        non_negative("interaction.throw_impulse", self.interaction.throw_impulse)?;
        non_negative("interaction.debug_line_secs", self.interaction.debug_line_secs)?;
        non_negative("character.walk_speed", self.character.walk_speed)?;
        non_negative("character.eye_height", self.character.eye_height)?;
        positive("character.capsule_radius", self.character.capsule_radius)?;
        positive("character.capsule_half_height", self.character.capsule_half_height)?;
        positive("bomb.fuse_secs", self.bomb.fuse_secs)?;
        positive("bomb.blast_radius", self.bomb.blast_radius)?;
        positive("bomb.radius", self.bomb.radius)?;
        positive("bomb.mass", self.bomb.mass)?;
        non_negative("game_mode.arena_radius", self.game_mode.arena_radius)?;

        if let Some(projectile) = &self.weapon.projectile {
            positive("weapon.projectile.speed", projectile.speed)?;
            positive("weapon.projectile.lifetime_secs", projectile.lifetime_secs)?;
            positive("weapon.projectile.radius", projectile.radius)?;
            non_negative("weapon.projectile.damage", projectile.damage)?;
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {}", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected zero or a positive number, got {}", value),
        })
    }
}

/// Character movement + look
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub walk_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub eye_height: f32,
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    /// Degrees of yaw per unit of Turn axis
    pub turn_rate_deg: f32,
    /// Degrees of pitch per unit of LookUp axis
    pub look_rate_deg: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            walk_speed: 600.0,
            gravity: -980.0,
            jump_velocity: 420.0,
            eye_height: 64.0,
            capsule_radius: 42.0,
            capsule_half_height: 96.0,
            turn_rate_deg: 2.5,
            look_rate_deg: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub pickup_range: f32,
    pub throw_impulse: f32,
    pub debug_line_secs: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            pickup_range: PICKUP_RANGE,
            throw_impulse: 1500.0,
            debug_line_secs: PROBE_DEBUG_LINE_SECS,
        }
    }
}

/// First-person rig offsets (each relative to its parent)
///
/// capsule → camera (eye height) → arms → gun → muzzle / hold point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub arms_offset: [f32; 3],
    /// Pitch, yaw, roll in degrees
    pub arms_rotation_deg: [f32; 3],
    pub grip_offset: [f32; 3],
    pub muzzle_offset: [f32; 3],
    pub hold_offset: [f32; 3],
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            arms_offset: [0.0, -160.0, 0.0],
            arms_rotation_deg: [0.0, 0.0, 0.0],
            grip_offset: [20.0, 140.0, -40.0],
            muzzle_offset: [0.0, 10.0, -60.0],
            hold_offset: [0.0, 0.0, -30.0],
        }
    }
}

impl RigConfig {
    pub fn arms_transform(&self) -> Transform {
        let [pitch, yaw, roll] = self.arms_rotation_deg;
        Transform::from_translation(Vec3::from_array(self.arms_offset)).with_rotation(
            Quat::from_euler(
                EulerRot::YXZ,
                yaw.to_radians(),
                pitch.to_radians(),
                roll.to_radians(),
            ),
        )
    }

    pub fn grip_transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.grip_offset))
    }

    pub fn muzzle_transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.muzzle_offset))
    }

    pub fn hold_transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.hold_offset))
    }
}

/// What the weapon does on Fire. Every part is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub projectile: Option<ProjectileConfig>,
    pub fire_sound: Option<String>,
    pub fire_animation: Option<String>,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            projectile: Some(ProjectileConfig::default()),
            fire_sound: Some("sounds/fire_01".to_string()),
            fire_animation: Some("animations/fp_fire".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub lifetime_secs: f32,
    pub radius: f32,
    /// Impulse applied to a simulating body on hit
    pub impulse: f32,
    /// Physical damage dealt to an agent on hit
    pub damage: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 3000.0,
            lifetime_secs: 3.0,
            radius: 5.0,
            impulse: 100.0,
            damage: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    pub fuse_secs: f32,
    pub blast_radius: f32,
    pub damage: f32,
    pub radius: f32,
    pub mass: f32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            fuse_secs: 2.0,
            blast_radius: 400.0,
            damage: 100.0,
            radius: 20.0,
            mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameModeConfig {
    pub seed: u64,
    pub bomb_count: u32,
    pub arena_radius: f32,
    /// Bombs never land closer than this to the player spawn
    pub min_bomb_distance: f32,
    pub player_spawn: [f32; 3],
}

impl Default for GameModeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bomb_count: 4,
            arena_radius: 1000.0,
            min_bomb_distance: 150.0,
            player_spawn: [0.0, 96.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert_eq!(GameConfig::default().interaction.pickup_range, 300.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(
            r#"{ "physics": "rapier", "interaction": { "throw_impulse": 900.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.physics, PhysicsBackend::Rapier);
        assert_eq!(config.interaction.throw_impulse, 900.0);
        assert_eq!(config.interaction.pickup_range, PICKUP_RANGE);
        assert_eq!(config.character, CharacterConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::default();
        let json = config.to_json_string().unwrap();
        let parsed = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_non_positive_range() {
        let err = GameConfig::from_json_str(r#"{ "interaction": { "pickup_range": 0.0 } }"#)
            .unwrap_err();

        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "interaction.pickup_range"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_weapon_parts_can_be_disabled() {
        let config = GameConfig::from_json_str(
            r#"{ "weapon": { "projectile": null, "fire_sound": null, "fire_animation": null } }"#,
        )
        .unwrap();

        assert!(config.weapon.projectile.is_none());
        assert!(config.weapon.fire_sound.is_none());
        assert!(config.weapon.fire_animation.is_none());
    }
}
