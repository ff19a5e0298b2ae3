//! Spawn collision handling
//!
//! Decides where (and whether) to spawn something whose desired location may
//! overlap existing shapes.

use bevy::prelude::*;

/// How many push-out passes before giving up on a clean spot
const MAX_ADJUST_PASSES: usize = 4;

/// Extra clearance after a push-out
const SKIN: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SpawnCollisionPolicy {
    /// Spawn at the desired location, overlap or not
    AlwaysSpawn,
    /// Nudge out of overlaps; spawn even if still overlapping
    #[default]
    AdjustIfPossibleButAlwaysSpawn,
    /// Nudge out of overlaps; refuse if still overlapping
    AdjustIfPossibleButDontSpawnIfColliding,
}

/// Sphere already in the world (center, radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blocker {
    pub center: Vec3,
    pub radius: f32,
}

fn penetration(position: Vec3, radius: f32, blocker: &Blocker) -> f32 {
    blocker.radius + radius - position.distance(blocker.center)
}

fn overlaps_any(position: Vec3, radius: f32, blockers: &[Blocker]) -> bool {
    blockers
        .iter()
        .any(|blocker| penetration(position, radius, blocker) > 0.0)
}

/// Final spawn location, None when the policy refuses to spawn
pub fn resolve_spawn_location(
    policy: SpawnCollisionPolicy,
    desired: Vec3,
    radius: f32,
    blockers: &[Blocker],
) -> Option<Vec3> {
    if policy == SpawnCollisionPolicy::AlwaysSpawn {
        return Some(desired);
    }

    let mut position = desired;
    for _ in 0..MAX_ADJUST_PASSES {
        let mut moved = false;

        for blocker in blockers {
            let depth = penetration(position, radius, blocker);
            if depth <= 0.0 {
                continue;
            }

            // Coincident centres: push straight up
            let away = (position - blocker.center).try_normalize().unwrap_or(Vec3::Y);
            position += away * (depth + SKIN);
            moved = true;
        }

        if !moved {
            return Some(position);
        }
    }

    if !overlaps_any(position, radius, blockers) {
        return Some(position);
    }

    match policy {
        SpawnCollisionPolicy::AdjustIfPossibleButDontSpawnIfColliding => None,
        _ => Some(position),
    }
}
