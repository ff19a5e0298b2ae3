//! Headless session runner
//!
//! Starts a session (player + bombs), then plays a short scripted sequence:
//! walk, fire, pick up a bomb, throw it and wait for the blast.
//!
//! Usage: `fpsgame_simulation [config.json]`

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use fpsgame_simulation::combat::{BombExploded, WeaponFired};
use fpsgame_simulation::{
    create_headless_app, log_error, log_info, ActionInput, AxisInput, GameConfig, GameModePlugin,
    HeldInteractable, InputAction, InputAxis, SessionRoster,
};

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(1) else {
        return GameConfig::default();
    };

    let loaded = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| GameConfig::from_json_str(&json).map_err(|err| err.to_string()));

    match loaded {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Could not load {path}: {err}, using defaults"));
            GameConfig::default()
        }
    }
}

fn press(app: &mut App, action: InputAction) {
    app.world_mut().send_event(ActionInput::pressed(action));
}

fn release(app: &mut App, action: InputAction) {
    app.world_mut().send_event(ActionInput::released(action));
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn main() {
    let config = load_config();
    let mut app = create_headless_app(config.clone());
    app.add_plugins(GameModePlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    // Startup: player + bombs
    app.update();

    let roster = app.world().resource::<SessionRoster>().clone();
    let Some(player) = roster.player else {
        log_error("No player spawned");
        return;
    };

    // Walk forward for half a second
    for _ in 0..30 {
        app.world_mut().send_event(AxisInput::new(InputAxis::MoveForward, 1.0));
        app.update();
    }

    press(&mut app, InputAction::Fire);
    app.update();
    release(&mut app, InputAction::Fire);
    let shots = app.world().resource::<Events<WeaponFired>>().len();
    log_info(&format!("Shots fired: {shots}"));

    // Put the first bomb in front of the camera so the probe can find it
    if let Some(&bomb) = roster.bombs.first() {
        let player_position = app
            .world()
            .get::<Transform>(player)
            .map(|transform| transform.translation)
            .unwrap_or_default();
        let in_view = player_position
            + Vec3::new(0.0, config.character.eye_height, -config.interaction.pickup_range * 0.5);
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(bomb) {
            transform.translation = in_view;
        }
    }

    press(&mut app, InputAction::SpawnBomb);
    app.update();
    let held = app
        .world()
        .get::<HeldInteractable>(player)
        .copied()
        .unwrap_or_default();
    log_info(&format!("After pickup: {held:?}"));

    release(&mut app, InputAction::SpawnBomb);
    app.update();

    // Wait for the fuse
    let fuse_frames = (config.bomb.fuse_secs / FRAME.as_secs_f32()).ceil() as usize + 2;
    let mut explosions = 0;
    for _ in 0..fuse_frames {
        app.update();
        explosions += app
            .world()
            .resource::<Events<BombExploded>>()
            .iter_current_update_events()
            .count();
    }

    log_info(&format!(
        "Session complete: {} entities, {} explosion(s)",
        app.world().entities().len(),
        explosions
    ));
}
