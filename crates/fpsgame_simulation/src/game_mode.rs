//! Game mode: session setup
//!
//! On startup spawns the local player and scatters bombs over the arena.
//! The scatter is driven by a seeded ChaCha8 stream so the same seed always
//! yields the same layout.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::character::spawn_player_character;
use crate::combat::spawn_bomb;
use crate::config::{GameConfig, GameModeConfig};

/// Attempts per bomb before accepting a spot that breaks the spacing rule
const MAX_PLACEMENT_ATTEMPTS: usize = 32;

/// Deterministic RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Session participants created at startup
#[derive(Resource, Debug, Clone, Default)]
pub struct SessionRoster {
    pub player: Option<Entity>,
    pub bombs: Vec<Entity>,
}

pub struct GameModePlugin;

impl Plugin for GameModePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionRoster>()
            .add_systems(Startup, start_session);
    }
}

/// Ground positions (x, z) for `count` bombs inside the arena disc
///
/// Spots keep `min_distance` from the player spawn and from each other when
/// possible.
pub fn scatter_bomb_positions(rng: &mut impl Rng, config: &GameModeConfig, count: u32) -> Vec<Vec2> {
    let spawn = Vec2::new(config.player_spawn[0], config.player_spawn[2]);
    let mut placed: Vec<Vec2> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let mut candidate = Vec2::ZERO;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            // Uniform over the disc
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let distance = config.arena_radius * rng.gen::<f32>().sqrt();
            candidate = Vec2::from_angle(angle) * distance;

            let clear = candidate.distance(spawn) >= config.min_bomb_distance
                && placed
                    .iter()
                    .all(|other| candidate.distance(*other) >= config.min_bomb_distance);
            if clear {
                break;
            }
        }
        placed.push(candidate);
    }

    placed
}

/// Startup system: player + bombs
pub fn start_session(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut roster: ResMut<SessionRoster>,
) {
    let mode = &config.game_mode;

    let player = spawn_player_character(&mut commands, &config, Vec3::from_array(mode.player_spawn));
    roster.player = Some(player);

    let spots = scatter_bomb_positions(&mut rng.rng, mode, mode.bomb_count);
    for spot in spots {
        let position = Vec3::new(spot.x, config.bomb.radius, spot.y);
        roster.bombs.push(spawn_bomb(&mut commands, &config.bomb, position));
    }

    crate::logger::log_info(&format!(
        "Session started (seed {}): player {:?}, {} bomb(s)",
        rng.seed,
        player,
        roster.bombs.len()
    ));
}
