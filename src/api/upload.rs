//! Image upload endpoint for the admin panel.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::models::UploadResult;
use crate::AppState;

/// POST /api/upload - Store a multipart `file` field under the public
/// uploads directory and return its URL.
pub async fn upload_image(
    _session: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let extension = field
            .file_name()
            .and_then(safe_extension)
            .unwrap_or_else(|| "bin".to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?;

        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        std::fs::write(state.config.upload_dir.join(&file_name), &data)?;
        tracing::info!("Stored upload {} ({} bytes)", file_name, data.len());

        return Ok(Json(UploadResult {
            success: true,
            url: format!("/uploads/{}", file_name),
        }));
    }

    Err(AppError::Validation("file field is required".to_string()))
}

/// Extension of the client file name, kept only when it is a short
/// alphanumeric token. Uploaded files are served from a public directory.
fn safe_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if (1..=8).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}
