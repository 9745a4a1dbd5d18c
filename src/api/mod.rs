//! REST API module.
//!
//! Contains all API routes and handlers exposed to the public site and the
//! admin panel.

mod auth;
mod collections;
mod translations;
mod upload;

pub use auth::*;
pub use collections::*;
pub use translations::*;
pub use upload::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(item: T) -> Self {
        Self {
            success: true,
            item: Some(item),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            success: true,
            item: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response carrying the affected record.
pub fn success<T: Serialize>(item: T) -> ApiResult<T> {
    Ok(ApiResponse::new(item))
}

/// Create a successful API response with no payload.
pub fn done() -> ApiResult<()> {
    Ok(ApiResponse::ok())
}
