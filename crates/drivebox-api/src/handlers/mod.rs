//! HTTP handlers, grouped by domain.

pub mod file;
pub mod folder;
pub mod health;
pub mod resource;
pub mod search;
pub mod share;
pub mod trash;

use validator::Validate;

use drivebox_core::error::AppError;

use crate::error::ApiError;

/// Run DTO validation, mapping failures into the Validation error kind.
pub(crate) fn validate_dto<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))
}
