//! Held reference: the agent's single carried interactable

use bevy::prelude::*;

/// Pickup/throw state of an agent
///
/// ```text
/// Empty ──pickup (probe hits free interactable)──▶ Holding(obj)
/// Holding(obj) ──throw──▶ Empty            (always, even if obj is gone)
/// Holding ──pickup──▶ Holding              (ignored)
/// Empty ──throw──▶ Empty                   (ignored)
/// ```
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum HeldInteractable {
    #[default]
    Empty,
    Holding(Entity),
}

impl HeldInteractable {
    pub fn is_empty(&self) -> bool {
        matches!(self, HeldInteractable::Empty)
    }

    pub fn held(&self) -> Option<Entity> {
        match self {
            HeldInteractable::Empty => None,
            HeldInteractable::Holding(entity) => Some(*entity),
        }
    }

    /// Empty → Holding(object). False (and no change) when already holding.
    pub fn try_hold(&mut self, object: Entity) -> bool {
        if !self.is_empty() {
            return false;
        }
        *self = HeldInteractable::Holding(object);
        true
    }

    /// Drop the reference unconditionally, returning what was held
    pub fn take(&mut self) -> Option<Entity> {
        let held = self.held();
        *self = HeldInteractable::Empty;
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_empty() {
        assert!(HeldInteractable::default().is_empty());
    }

    #[test]
    fn test_second_hold_ignored() {
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);

        let mut held = HeldInteractable::default();
        assert!(held.try_hold(first));
        assert!(!held.try_hold(second));
        assert_eq!(held, HeldInteractable::Holding(first));
    }

    #[test]
    fn test_take_empties() {
        let mut held = HeldInteractable::Holding(Entity::from_raw(7));
        assert_eq!(held.take(), Some(Entity::from_raw(7)));
        assert!(held.is_empty());
        assert_eq!(held.take(), None);
    }
}
