//! Small rotation helpers shared by the controller and the weapon rig.

pub mod aim;

pub use aim::{align, align_delta};
