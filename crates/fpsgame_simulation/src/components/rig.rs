//! First-person rig: camera, arms mesh, gun mesh
//!
//! Hierarchy (built once by `spawn_player_character`):
//!
//! ```text
//! Agent (capsule root, yaw)
//! └── FirstPersonCamera (eye height, pitch)
//!     └── ArmsMesh (AnimInstance, "Arms" montage slot)
//!         └── GunMesh (GripPoint; Muzzle + hold sockets)
//!             └── held interactable (while holding)
//! ```

use bevy::prelude::*;

/// Child entity ids of the first-person rig, stored on the agent root
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterRig {
    pub camera: Entity,
    pub arms: Entity,
    pub gun: Entity,
}

/// Marker: the view camera. Local transform carries the pitch.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct FirstPersonCamera;

/// Marker: first-person arms mesh (hidden from shadows on the render side)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ArmsMesh;

/// Gun mesh with its sockets (local to the gun)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GunMesh {
    pub muzzle: Transform,
    /// Where a held interactable sits
    pub hold_point: Transform,
}

/// Animation instance on a skeletal mesh
///
/// Montage playback is host-side; the presence of this component is what
/// makes a mesh able to play one.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AnimInstance {
    /// Last montage requested (for debugging/tests)
    pub last_montage: Option<String>,
}
