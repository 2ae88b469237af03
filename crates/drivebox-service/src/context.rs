//! Request context carrying the asserted actor identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivebox_core::types::UserId;

/// Context for the current request.
///
/// The upstream identity provider asserts a user id and e-mail; nothing
/// else about the actor is known or needed. Passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's e-mail (share grants are keyed by e-mail).
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            request_time: Utc::now(),
        }
    }
}
