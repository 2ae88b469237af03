//! Route definitions for the Drivebox HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(resource_routes())
        .merge(file_routes())
        .merge(folder_routes())
        .merge(share_routes())
        .merge(trash_routes())
        .merge(search_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Listing and the type-polymorphic lifecycle operations.
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/resources", get(handlers::resource::list_resources))
        .route(
            "/resources/{type}/{id}/trash",
            post(handlers::resource::soft_delete),
        )
        .route(
            "/resources/{type}/{id}/restore",
            post(handlers::resource::restore),
        )
        .route(
            "/resources/{type}/{id}",
            delete(handlers::resource::permanent_delete),
        )
        .route(
            "/resources/{type}/{id}/move",
            put(handlers::resource::move_resource),
        )
        .route(
            "/resources/{type}/{id}/rename",
            put(handlers::resource::rename_resource),
        )
}

/// File-specific operations.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/upload-complete", post(handlers::file::upload_complete))
        .route("/files/{id}/copy", post(handlers::file::copy_file))
        .route("/files/{id}/star", put(handlers::file::toggle_star))
        .route("/files/{id}/url", get(handlers::file::mediate_access))
}

/// Folder creation, children, breadcrumbs.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders", get(handlers::folder::list_children))
        .route("/folders/{id}/path", get(handlers::folder::ancestor_path))
}

/// Share management and the grantee's view.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares", post(handlers::share::invite))
        .route("/shares", get(handlers::share::list_by_resource))
        .route("/shares/{id}", delete(handlers::share::revoke))
        .route("/shares/{id}", put(handlers::share::change_role))
        .route("/shared-with-me", get(handlers::share::shared_with_me))
}

/// Trash emptying.
fn trash_routes() -> Router<AppState> {
    Router::new().route("/trash", delete(handlers::trash::empty_trash))
}

/// Name search.
fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(handlers::search::search))
}

/// Health check (no identity required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
