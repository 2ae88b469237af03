//! Extracts the asserted actor identity from request headers.
//!
//! Authentication happens upstream; the identity provider in front of this
//! service asserts who is calling through the `x-user-id` and
//! `x-user-email` headers. Requests without both headers never reach a
//! service method.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use drivebox_core::error::AppError;
use drivebox_core::types::UserId;
use drivebox_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the asserted user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the asserted user e-mail.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The acting user, extracted from the identity headers.
#[derive(Debug, Clone)]
pub struct Actor(pub RequestContext);

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            ApiError(AppError::access_denied(format!(
                "Missing identity header: {name}"
            )))
        })?
        .to_str()
        .map_err(|_| {
            ApiError(AppError::access_denied(format!(
                "Malformed identity header: {name}"
            )))
        })
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id: UserId = header(parts, USER_ID_HEADER)?.parse().map_err(|_| {
            ApiError(AppError::access_denied(format!(
                "Malformed identity header: {USER_ID_HEADER}"
            )))
        })?;
        let email = header(parts, USER_EMAIL_HEADER)?.to_string();

        Ok(Actor(RequestContext::new(user_id, email)))
    }
}
