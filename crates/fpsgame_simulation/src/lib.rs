//! First-person game simulation core
//!
//! ECS simulation on Bevy 0.16: a first-person character that moves, looks,
//! jumps, fires a configurable weapon and picks up / throws bombs.
//!
//! Frame layout:
//! 1. `GameplaySet::Input` raw input → intents (before the fixed loop)
//! 2. `GameplaySet::Character` look, move, jump (before the fixed loop)
//! 3. `FixedUpdate` kinematic and free-body integration (60Hz), then the
//!    consumed `PendingMovement` is cleared
//! 4. `GameplaySet::Combat` fire, projectiles (`Update`)
//! 5. `GameplaySet::Interaction` pickup probe, attach, throw (`Update`)
//! 6. `GameplaySet::Damage` bomb fuses, damage intake (`Update`)
//!
//! Physics is either headless (analytic queries, own integration) or Rapier.

use bevy::app::{RunFixedMainLoop, RunFixedMainLoopSystem};
use bevy::prelude::*;

pub mod character;
pub mod combat;
pub mod components;
pub mod config;
pub mod debug_draw;
pub mod game_mode;
pub mod input;
pub mod interaction;
pub mod logger;
pub mod math;
pub mod physics;
pub mod shared;

pub use character::{spawn_character, spawn_player_character, CharacterPlugin};
pub use combat::{spawn_bomb, CombatPlugin, DamageKind, TakeDamage, WeaponLoadout};
pub use components::*;
pub use config::{ConfigError, GameConfig, PhysicsBackend};
pub use game_mode::{DeterministicRng, GameModePlugin, SessionRoster};
pub use input::{ActionInput, AxisInput, InputAction, InputAxis, InputEdge, PlayerInputPlugin};
pub use interaction::{HeldInteractable, Interactable, InteractionPlugin};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::PhysicsPlugin;

/// Ordered phases of one gameplay frame
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Input,
    Character,
    Combat,
    Interaction,
    Damage,
}

/// Main simulation plugin (all gameplay subsystems)
///
/// Does not spawn anything; add `GameModePlugin` for a ready session.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: GameConfig,
}

impl SimulationPlugin {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(err) => {
                logger::log_error(&format!("Invalid game config: {err}, using defaults"));
                GameConfig::default()
            }
        };

        app.insert_resource(DeterministicRng::new(config.game_mode.seed))
            .insert_resource(config)
            // Fixed timestep 60Hz for kinematic integration
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                RunFixedMainLoop,
                (GameplaySet::Input, GameplaySet::Character)
                    .chain()
                    .in_set(RunFixedMainLoopSystem::BeforeFixedMainLoop),
            )
            .configure_sets(
                Update,
                (
                    GameplaySet::Combat,
                    GameplaySet::Interaction,
                    GameplaySet::Damage,
                )
                    .chain(),
            )
            .add_plugins((
                PlayerInputPlugin,
                CharacterPlugin,
                CombatPlugin,
                InteractionPlugin,
                PhysicsPlugin,
            ))
            .add_systems(Update, debug_draw::expire_debug_lines.after(GameplaySet::Damage));
    }
}

/// Minimal Bevy app for headless simulation
pub fn create_headless_app(config: GameConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::new(config));

    app
}

/// World snapshot for determinism comparisons
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Sorted by index: query order is not guaranteed
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let mut config = GameConfig::default();
        config.interaction.pickup_range = -50.0;
        config.game_mode.seed = 99;

        let app = create_headless_app(config);
        let installed = app.world().resource::<GameConfig>();

        assert_eq!(*installed, GameConfig::default());
        assert_eq!(installed.interaction.pickup_range, 300.0);
    }

    #[test]
    fn test_valid_config_is_kept() {
        let mut config = GameConfig::default();
        config.interaction.pickup_range = 450.0;

        let app = create_headless_app(config.clone());

        assert_eq!(*app.world().resource::<GameConfig>(), config);
    }
}
