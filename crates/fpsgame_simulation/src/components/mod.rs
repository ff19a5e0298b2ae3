//! ECS components for game entities
//!
//! Organised by domain:
//! - actor: Agent, Controller, PhysicsBody, Incapacitated
//! - player: Player marker
//! - rig: first-person rig parts (camera, arms, gun, anim instance)
//! - world: headless query shapes, surface materials

pub mod actor;
pub mod player;
pub mod rig;
pub mod world;

pub use actor::*;
pub use player::*;
pub use rig::*;
pub use world::*;
