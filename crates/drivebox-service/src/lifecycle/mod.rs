//! Resource lifecycle orchestration.

pub mod service;

pub use service::{LifecycleService, PurgeReport};
