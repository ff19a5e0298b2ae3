//! Transient debug lines (diagnostics only)
//!
//! Gameplay pushes lines into `DebugLines`; a render front-end may draw the
//! buffer every frame. Lines expire after their duration.

use bevy::prelude::*;

/// RGB, 0..1
pub type DebugColor = [f32; 3];

pub const GREEN: DebugColor = [0.0, 1.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: DebugColor,
    pub thickness: f32,
    /// Seconds left
    pub remaining: f32,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct DebugLines {
    pub lines: Vec<DebugLine>,
}

impl DebugLines {
    pub fn push(&mut self, start: Vec3, end: Vec3, color: DebugColor, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        self.lines.push(DebugLine {
            start,
            end,
            color,
            thickness: 1.0,
            remaining: duration,
        });
    }

    pub fn tick(&mut self, delta: f32) {
        for line in self.lines.iter_mut() {
            line.remaining -= delta;
        }
        self.lines.retain(|line| line.remaining > 0.0);
    }
}

/// System: age lines, drop expired ones
pub fn expire_debug_lines(mut lines: ResMut<DebugLines>, time: Res<Time>) {
    lines.tick(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_expire() {
        let mut lines = DebugLines::default();
        lines.push(Vec3::ZERO, Vec3::X, GREEN, 2.0);

        lines.tick(1.5);
        assert_eq!(lines.lines.len(), 1);

        lines.tick(0.6);
        assert!(lines.lines.is_empty());
    }

    #[test]
    fn test_zero_duration_not_recorded() {
        let mut lines = DebugLines::default();
        lines.push(Vec3::ZERO, Vec3::X, GREEN, 0.0);
        assert!(lines.lines.is_empty());
    }
}
