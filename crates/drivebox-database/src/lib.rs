//! # drivebox-database
//!
//! Metadata store adapter for Drivebox: concrete repository
//! implementations over concurrent in-process tables.
//!
//! The metadata store contract is deliberately small — keyed CRUD plus
//! equality and membership filtering — and per-row update semantics are
//! the only consistency guarantee. Deletes are "delete if exists":
//! removing an already-absent row reports `false`, never an error, so
//! overlapping cascading purges stay safe.

pub mod repositories;

pub use repositories::{FileRepository, FolderRepository, ShareRepository};
