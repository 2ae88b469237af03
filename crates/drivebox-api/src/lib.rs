//! # drivebox-api
//!
//! HTTP API layer for Drivebox. Maps the service operations onto Axum
//! routes with JSON bodies; the upstream identity provider asserts the
//! actor through the `x-user-id` / `x-user-email` headers.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_state, serve};
pub use state::AppState;
