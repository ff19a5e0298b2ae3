//! Player input module
//!
//! Turns raw host input into typed intents for the gameplay systems.
//!
//! # Architecture
//!
//! ```text
//! Host input (keyboard/mouse/gamepad)
//!     ↓
//! ActionInput / AxisInput (ECS events) - events.rs
//!     ↓
//! InputBindings table - bindings.rs
//!     ↓
//! dispatch_player_input (ECS system) - systems.rs
//!     ↓
//! JumpIntent / FireIntent / PickupIntent / ThrowIntent / MoveIntent / LookIntent
//! ```

use bevy::app::RunFixedMainLoop;
use bevy::prelude::*;

use crate::GameplaySet;

pub mod bindings;
pub mod events;
pub mod systems;


pub use bindings::*;
pub use events::*;
pub use systems::*;

/// Registers raw input events, the default binding table and the dispatcher
pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActionInput>()
            .add_event::<AxisInput>()
            .init_resource::<InputBindings>()
            .add_systems(RunFixedMainLoop, dispatch_player_input.in_set(GameplaySet::Input));
    }
}
