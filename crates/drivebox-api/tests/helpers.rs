//! Shared test helpers for HTTP API tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use drivebox_api::router::build_router;
use drivebox_core::config::AppConfig;
use drivebox_storage::memory::MemoryBlobStore;

/// An asserted identity, as the upstream provider would send it.
#[derive(Debug, Clone)]
pub struct Identity {
    /// User id header value.
    pub user_id: String,
    /// E-mail header value.
    pub email: String,
}

impl Identity {
    /// A fresh random identity.
    pub fn new(email: &str) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            email: email.to_string(),
        }
    }
}

/// Response captured from a test request.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body (JSON null when the body is empty).
    pub body: Value,
}

impl TestResponse {
    /// The `data` object of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
}

impl TestApp {
    /// Create a new test application over in-memory stores.
    pub fn new() -> Self {
        let config = AppConfig::default();
        let blob_store = Arc::new(MemoryBlobStore::new("http://test"));
        let state = drivebox_api::build_state(config, blob_store);
        Self {
            router: build_router(state),
        }
    }

    /// Issue a request, optionally with a JSON body and an identity.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        identity: Option<&Identity>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(identity) = identity {
            builder = builder
                .header("x-user-id", &identity.user_id)
                .header("x-user-email", &identity.email);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse body")
        };

        TestResponse { status, body }
    }
}
