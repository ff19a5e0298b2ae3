//! Interaction probe: one forward ray from the player's view
//!
//! `probe(origin, direction, max_range) -> Option<ProbeHit>`
//!
//! - origin/direction come from the first-person camera (world pose)
//! - max_range = `GameConfig::interaction.pickup_range` (300 by default)
//! - the querying agent is never hit
//! - nearest blocking hit wins, its `SurfaceMaterial` comes along
//!
//! Two backends answer the query:
//! - headless: analytic ray/sphere against root entities with `ProbeShape`
//! - rapier: `RapierContext::cast_ray_and_get_normal`

use bevy::prelude::*;

use crate::components::SurfaceMaterial;

/// Ray of one probe. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRay {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_range: f32,
}

impl ProbeRay {
    /// None for a zero/non-finite direction
    pub fn new(origin: Vec3, direction: Vec3, max_range: f32) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self {
            origin,
            direction,
            max_range,
        })
    }

    /// Ray along the view's forward (-Z) axis
    pub fn from_view(view: &Transform, max_range: f32) -> Self {
        Self {
            origin: view.translation,
            direction: *view.forward(),
            max_range,
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    pub fn end(&self) -> Vec3 {
        self.point_at(self.max_range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
    pub material: Option<SurfaceMaterial>,
}

/// Distance along the ray to a sphere, None on a miss
///
/// Origin inside the sphere counts as a hit at distance 0 (solid query).
pub fn ray_sphere_distance(ray: &ProbeRay, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - ray.origin;
    let c = to_center.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = to_center.dot(ray.direction);
    if b < 0.0 {
        // Sphere behind the origin
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let distance = b - discriminant.sqrt();
    (distance <= ray.max_range).then_some(distance)
}

/// Candidate shape for the headless probe
#[derive(Debug, Clone, Copy)]
pub struct ProbeCandidate {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub material: Option<SurfaceMaterial>,
}

/// Nearest hit among `candidates`, skipping `ignore`
pub fn probe_candidates(
    ray: &ProbeRay,
    ignore: Entity,
    candidates: impl IntoIterator<Item = ProbeCandidate>,
) -> Option<ProbeHit> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.entity != ignore)
        .filter_map(|candidate| {
            ray_sphere_distance(ray, candidate.center, candidate.radius).map(|distance| ProbeHit {
                entity: candidate.entity,
                distance,
                point: ray.point_at(distance),
                material: candidate.material,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray() -> ProbeRay {
        ProbeRay::new(Vec3::ZERO, Vec3::NEG_Z, 300.0).unwrap()
    }

    fn candidate(index: u32, z: f32) -> ProbeCandidate {
        ProbeCandidate {
            entity: Entity::from_raw(index),
            center: Vec3::new(0.0, 0.0, z),
            radius: 20.0,
            material: None,
        }
    }

    #[test]
    fn test_sphere_hit_distance() {
        let distance = ray_sphere_distance(&ray(), Vec3::new(0.0, 0.0, -100.0), 20.0).unwrap();
        assert!((distance - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_beyond_range_misses() {
        assert!(ray_sphere_distance(&ray(), Vec3::new(0.0, 0.0, -400.0), 20.0).is_none());
    }

    #[test]
    fn test_sphere_behind_misses() {
        assert!(ray_sphere_distance(&ray(), Vec3::new(0.0, 0.0, 100.0), 20.0).is_none());
    }

    #[test]
    fn test_sphere_off_axis_misses() {
        assert!(ray_sphere_distance(&ray(), Vec3::new(50.0, 0.0, -100.0), 20.0).is_none());
    }

    #[test]
    fn test_origin_inside_is_zero() {
        assert_eq!(ray_sphere_distance(&ray(), Vec3::new(0.0, 5.0, 0.0), 20.0), Some(0.0));
    }

    #[test]
    fn test_nearest_candidate_wins() {
        let hit = probe_candidates(
            &ray(),
            Entity::PLACEHOLDER,
            [candidate(1, -250.0), candidate(2, -120.0), candidate(3, -200.0)],
        )
        .unwrap();

        assert_eq!(hit.entity, Entity::from_raw(2));
        assert!((hit.point.z + 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_ignored_entity_skipped() {
        let hit = probe_candidates(&ray(), Entity::from_raw(2), [candidate(2, -120.0)]);
        assert!(hit.is_none());
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert!(ProbeRay::new(Vec3::ZERO, Vec3::ZERO, 300.0).is_none());
    }

    #[test]
    fn test_ray_from_view() {
        let view = Transform::from_xyz(0.0, 64.0, 0.0).looking_to(Vec3::X, Vec3::Y);
        let ray = ProbeRay::from_view(&view, 300.0);

        assert!((ray.direction - Vec3::X).length() < 1e-5);
        assert!((ray.end() - Vec3::new(300.0, 64.0, 0.0)).length() < 1e-3);
    }
}
