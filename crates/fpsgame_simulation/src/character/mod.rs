//! Character controller
//!
//! - spawn: rig composition (capsule → camera → arms → gun)
//! - look: yaw/pitch from Turn/LookUp
//! - movement: MoveForward/MoveRight/Jump → kinematic controller
//!
//! Intents обрабатываются в `RunFixedMainLoop` перед fixed loop (тот же кадр,
//! что и input), kinematic integration идёт в `FixedUpdate` (60Hz).

use bevy::app::{RunFixedMainLoop, RunFixedMainLoopSystem};
use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;

pub mod look;
pub mod movement;
pub mod spawn;

pub use look::{apply_look_intents, LookAxis, LookIntent, ViewAngles, MAX_PITCH_DEG};
pub use movement::{
    add_movement_input, apply_jump_intents, apply_move_intents, clear_pending_movement,
    fixed_step_ran, FixedStepRan, JumpIntent, KinematicController, MoveAxis, MoveIntent,
    PendingMovement,
};
pub use spawn::{spawn_character, spawn_player_character};

use crate::config::{headless_physics, rapier_physics};
use crate::GameplaySet;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveIntent>()
            .add_event::<JumpIntent>()
            .add_event::<LookIntent>()
            .init_resource::<FixedStepRan>();

        app.add_systems(
            RunFixedMainLoop,
            (
                (apply_look_intents, apply_move_intents, apply_jump_intents)
                    .chain()
                    .in_set(GameplaySet::Character),
                clear_pending_movement
                    .run_if(fixed_step_ran)
                    .in_set(RunFixedMainLoopSystem::AfterFixedMainLoop),
            ),
        );
        app.add_systems(PreUpdate, movement::reset_fixed_step_flag);
        app.add_systems(FixedPreUpdate, movement::mark_fixed_step);

        app.add_systems(
            FixedUpdate,
            (
                movement::ground_detection,
                movement::apply_movement_input,
                movement::apply_gravity,
                movement::integrate_velocity_to_transform.run_if(headless_physics),
                movement::sync_velocity_to_rapier.run_if(rapier_physics),
            )
                .chain()
                .before(PhysicsSet::SyncBackend),
        );
    }
}
