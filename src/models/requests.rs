//! Request and response bodies shared by the API handlers.

use serde::{Deserialize, Serialize};

/// Request body for the admin login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Query parameters for deleting a record.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub id: Option<String>,
}

/// Query parameters for reading a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Option<String>,
}

/// Response body for the session status endpoint.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub success: bool,
    pub authenticated: bool,
}

/// Response body for the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub success: bool,
    pub url: String,
}
