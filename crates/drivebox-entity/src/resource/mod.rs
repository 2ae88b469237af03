//! Polymorphic resource types.

pub mod model;

pub use model::{Resource, ResourceType};
