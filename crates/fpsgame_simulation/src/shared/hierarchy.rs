//! World-space poses computed from the `ChildOf` chain
//!
//! Gameplay systems run before (or without) transform propagation, so they
//! never read `GlobalTransform`. A pose is rebuilt from local `Transform`s
//! walking up to the root instead.

use bevy::prelude::*;

/// Guards against cycles in a corrupted hierarchy
const MAX_DEPTH: usize = 32;

pub type HierarchyQuery<'w, 's> = Query<'w, 's, (&'static Transform, Option<&'static ChildOf>)>;

/// World pose of `entity`, None if any link of the chain is missing
pub fn world_transform(entity: Entity, transforms: &HierarchyQuery) -> Option<Transform> {
    let (local, parent) = transforms.get(entity).ok()?;

    let mut world = *local;
    let mut next = parent.map(ChildOf::parent);
    let mut depth = 0;

    while let Some(parent) = next {
        depth += 1;
        if depth > MAX_DEPTH {
            return None;
        }

        let (parent_local, grandparent) = transforms.get(parent).ok()?;
        world = parent_local.mul_transform(world);
        next = grandparent.map(ChildOf::parent);
    }

    Some(world)
}

/// True if `entity` is `ancestor` or sits anywhere below it
pub fn is_descendant_of(entity: Entity, ancestor: Entity, parents: &Query<&ChildOf>) -> bool {
    let mut current = entity;
    for _ in 0..=MAX_DEPTH {
        if current == ancestor {
            return true;
        }
        match parents.get(current) {
            Ok(child_of) => current = child_of.parent(),
            Err(_) => return false,
        }
    }
    false
}
