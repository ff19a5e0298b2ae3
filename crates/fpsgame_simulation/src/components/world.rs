//! World-facing components: query shapes and surface materials

use bevy::prelude::*;

/// Sphere used by the headless backend for ray queries and overlap tests
///
/// Centered on the entity's `Transform` translation. Only root entities
/// (no `ChildOf`) are considered, their `Transform` is world-space.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProbeShape {
    pub radius: f32,
}

impl ProbeShape {
    pub fn sphere(radius: f32) -> Self {
        Self { radius }
    }
}

/// Physical material returned with a probe hit
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum SurfaceMaterial {
    #[default]
    Default,
    Metal,
    Wood,
    Concrete,
    Flesh,
}
