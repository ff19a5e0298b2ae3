//! Interaction: camera-ray pickup and throw of interactable objects
//!
//! - probe: ray math + candidates (headless) / rapier query
//! - held: `HeldInteractable` state machine on the agent
//! - interactable: object component, attach/detach helpers, events
//! - systems: pickup probe, resolve, throw

use bevy::prelude::*;

pub mod held;
pub mod interactable;
pub mod probe;
pub mod systems;

pub use held::HeldInteractable;
pub use interactable::{
    attach_to_mount, release_from_mount, Interactable, InteractableAttached, InteractableThrown,
    PickupIntent, ThrowIntent,
};
pub use probe::{probe_candidates, ray_sphere_distance, ProbeCandidate, ProbeHit, ProbeRay};
pub use systems::{
    probe_for_pickup_headless, probe_for_pickup_rapier, resolve_pickup, throw_held, ProbeResolved,
};

use crate::config::{headless_physics, rapier_physics};
use crate::debug_draw::DebugLines;
use crate::GameplaySet;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PickupIntent>()
            .add_event::<ThrowIntent>()
            .add_event::<ProbeResolved>()
            .add_event::<InteractableAttached>()
            .add_event::<InteractableThrown>()
            .init_resource::<DebugLines>();

        // Pickup then throw: press + release in the same frame still ends Empty
        app.add_systems(
            Update,
            (
                probe_for_pickup_headless.run_if(headless_physics),
                probe_for_pickup_rapier.run_if(rapier_physics),
                resolve_pickup,
                throw_held,
            )
                .chain()
                .in_set(GameplaySet::Interaction),
        );
    }
}
