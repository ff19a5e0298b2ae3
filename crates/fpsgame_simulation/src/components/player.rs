//! Player control marker component
//!
//! Marks the entity the input bindings drive.

use bevy::prelude::*;

/// Marker component for the player-controlled agent
///
/// Input dispatch only looks at `With<Player>` entities. In single-player
/// exactly one entity carries it.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(crate::components::Agent)]
pub struct Player;
