//! Aim alignment: turn a rotation so that its up-axis points along a direction.
//!
//! Used to orient a held/thrown object (its up-axis) along the aim direction.
//!
//! Algorithm:
//! - up = base * Y
//! - axis = normalize(up × target)
//! - angle = angle between up and target
//! - result = Quat(axis, angle) * base
//!
//! Degenerate inputs never produce NaN:
//! - target parallel to up → identity delta
//! - target anti-parallel → half turn around some axis perpendicular to up
//! - zero-length / non-finite target → identity delta

use bevy::math::{Quat, Vec3};
use std::f32::consts::PI;

/// Incremental rotation taking `base`'s up-axis onto `target`.
pub fn align_delta(base: Quat, target: Vec3) -> Quat {
    // Magnitude of target is irrelevant
    let Some(target) = target.try_normalize() else {
        return Quat::IDENTITY;
    };

    let up = base * Vec3::Y;
    let cross = up.cross(target);
    let dot = up.dot(target);

    match cross.try_normalize() {
        // atan2 instead of acos(dot): same angle, no precision loss near 0/π
        Some(axis) => Quat::from_axis_angle(axis, cross.length().atan2(dot)),
        None if dot > 0.0 => Quat::IDENTITY,
        None => Quat::from_axis_angle(up.any_orthonormal_vector(), PI),
    }
}

/// `base` left-composed with the alignment delta.
pub fn align(base: Quat, target: Vec3) -> Quat {
    (align_delta(base, target) * base).normalize()
}
