//! Helpers shared across gameplay modules

pub mod hierarchy;

pub use hierarchy::*;
