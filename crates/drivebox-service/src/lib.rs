//! # drivebox-service
//!
//! Business logic service layer for Drivebox. Each service orchestrates
//! repositories and the blob store to implement application-level use
//! cases: permission resolution, tree traversal, resource lifecycle, and
//! permission-mediated access URLs.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod context;
pub mod file;
pub mod folder;
pub mod lifecycle;
pub mod permission;
pub mod share;

pub use access::AccessMediator;
pub use context::RequestContext;
pub use file::FileService;
pub use folder::{FolderService, TreeWalker};
pub use lifecycle::{LifecycleService, PurgeReport};
pub use permission::PermissionResolver;
pub use share::ShareService;
