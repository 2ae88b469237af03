//! Share grant management.

pub mod service;

pub use service::ShareService;
