//! # drivebox-entity
//!
//! Domain entity models for Drivebox. Every struct in this crate
//! represents a metadata-store row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod file;
pub mod folder;
pub mod permission;
pub mod resource;
pub mod share;
