//! Shared type definitions: typed identifiers and listing filters.

pub mod filter;
pub mod id;

pub use filter::ListFilter;
pub use id::{FileId, FolderId, ShareId, UserId};
