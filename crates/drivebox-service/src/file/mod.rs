//! File services: upload completion, listings, and file operations.

pub mod service;

pub use service::FileService;
