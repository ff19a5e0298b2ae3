//! Character movement integration tests
//!
//! Raw axis/action input through the full `SimulationPlugin` app (headless
//! backend, fixed 60Hz frames). Walk speed 600 → 10 units per frame.

use std::time::Duration;

use approx::assert_abs_diff_eq;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use fpsgame_simulation::character::{KinematicController, PendingMovement};
use fpsgame_simulation::debug_draw::DebugLines;
use fpsgame_simulation::interaction::InteractableThrown;
use fpsgame_simulation::*;

const STEP: f32 = 10.0;

fn create_player_app() -> (App, Entity) {
    let mut app = create_headless_app(GameConfig::default());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_nanos(16_666_667)));

    let player = app
        .world_mut()
        .run_system_once(|mut commands: Commands, config: Res<GameConfig>| {
            spawn_player_character(&mut commands, &config, Vec3::new(0.0, 96.0, 0.0))
        })
        .expect("spawn player");
    // First frame has a zero delta: no fixed step until the second
    app.update();
    app.update();

    (app, player)
}

fn position(app: &App, agent: Entity) -> Vec3 {
    app.world().get::<Transform>(agent).unwrap().translation
}

fn send_axis(app: &mut App, axis: InputAxis, value: f32, frames: usize) {
    for _ in 0..frames {
        app.world_mut().send_event(AxisInput::new(axis, value));
        app.update();
    }
}

fn assert_vec_close(actual: Vec3, expected: Vec3) {
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = 0.01);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = 0.01);
    assert_abs_diff_eq!(actual.z, expected.z, epsilon = 0.01);
}

#[test]
fn test_move_forward_same_frame() {
    let (mut app, player) = create_player_app();
    let start = position(&app, player);

    send_axis(&mut app, InputAxis::MoveForward, 1.0, 1);
    assert_vec_close(position(&app, player) - start, Vec3::NEG_Z * STEP);

    send_axis(&mut app, InputAxis::MoveForward, 1.0, 29);
    assert_vec_close(position(&app, player) - start, Vec3::NEG_Z * STEP * 30.0);
}

#[test]
fn test_zero_axis_does_not_move() {
    let (mut app, player) = create_player_app();

    send_axis(&mut app, InputAxis::MoveForward, 1.0, 10);
    let stopped_at = position(&app, player);

    send_axis(&mut app, InputAxis::MoveForward, 0.0, 10);
    assert_eq!(position(&app, player), stopped_at);

    // No input at all
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(position(&app, player), stopped_at);
    assert_eq!(*app.world().get::<PendingMovement>(player).unwrap(), PendingMovement::default());
}

#[test]
fn test_half_axis_moves_half_as_far() {
    let (mut app, player) = create_player_app();
    let start = position(&app, player);

    send_axis(&mut app, InputAxis::MoveForward, 0.5, 10);
    assert_vec_close(position(&app, player) - start, Vec3::NEG_Z * STEP * 5.0);
}

#[test]
fn test_forward_and_right_follow_turn() {
    let (mut app, player) = create_player_app();

    // turn_rate 2.5 deg per unit → 90 deg right
    send_axis(&mut app, InputAxis::Turn, 36.0, 1);
    let start = position(&app, player);

    send_axis(&mut app, InputAxis::MoveForward, 1.0, 10);
    let after_forward = position(&app, player);
    assert_vec_close(after_forward - start, Vec3::X * STEP * 10.0);

    send_axis(&mut app, InputAxis::MoveRight, 1.0, 10);
    assert_vec_close(position(&app, player) - after_forward, Vec3::Z * STEP * 10.0);
}

#[test]
fn test_look_up_raises_probe_and_throw() {
    let (mut app, player) = create_player_app();

    // look_rate 2.5 deg per unit → 30 deg up
    send_axis(&mut app, InputAxis::LookUp, 12.0, 1);
    let eye = position(&app, player) + Vec3::Y * 64.0;
    let view = Vec3::new(0.0, 30f32.to_radians().sin(), -30f32.to_radians().cos());

    let bomb = app
        .world_mut()
        .run_system_once(move |mut commands: Commands, config: Res<GameConfig>| {
            spawn_bomb(&mut commands, &config.bomb, eye + view * 150.0)
        })
        .expect("spawn bomb");

    app.world_mut().send_event(ActionInput::pressed(InputAction::SpawnBomb));
    app.update();

    let lines = &app.world().resource::<DebugLines>().lines;
    let probe = lines.last().unwrap();
    assert_vec_close(probe.start, eye);
    assert_vec_close(probe.end, eye + view * 300.0);
    assert_eq!(
        *app.world().get::<HeldInteractable>(player).unwrap(),
        HeldInteractable::Holding(bomb)
    );

    app.world_mut().send_event(ActionInput::released(InputAction::SpawnBomb));
    app.update();

    let thrown: Vec<_> = app
        .world()
        .resource::<Events<InteractableThrown>>()
        .iter_current_update_events()
        .copied()
        .collect();
    assert_eq!(thrown.len(), 1);
    assert!(thrown[0].direction.y > 0.49, "direction = {:?}", thrown[0].direction);
    assert!(thrown[0].direction.abs_diff_eq(view, 1e-3));
}

#[test]
fn test_jump_only_when_grounded() {
    let (mut app, player) = create_player_app();
    assert!(app.world().get::<KinematicController>(player).unwrap().grounded);

    app.world_mut().send_event(ActionInput::pressed(InputAction::Jump));
    app.update();
    let rising = app.world().get::<PhysicsBody>(player).unwrap().velocity.y;
    assert!(rising > 0.0);
    assert!(position(&app, player).y > 96.0);

    // Airborne: second jump ignored, gravity keeps slowing the climb
    app.world_mut().send_event(ActionInput::pressed(InputAction::Jump));
    app.update();
    let after_second = app.world().get::<PhysicsBody>(player).unwrap().velocity.y;
    assert!(after_second < rising, "{after_second} !< {rising}");

    // Land (420 up at 980 down is under a second of air time)
    for _ in 0..90 {
        app.update();
    }
    assert_abs_diff_eq!(position(&app, player).y, 96.0, epsilon = 0.01);
    assert!(app.world().get::<KinematicController>(player).unwrap().grounded);

    app.world_mut().send_event(ActionInput::pressed(InputAction::Jump));
    app.update();
    assert!(app.world().get::<PhysicsBody>(player).unwrap().velocity.y > 0.0);
}
