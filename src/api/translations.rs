//! Translation tree API endpoints (admin only, reads included).

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde_json::Value;

use super::{done, ApiResult};
use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::models::Lang;
use crate::AppState;

/// GET /api/translations - All translation trees keyed by language.
pub async fn get_translations(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<Lang, Value>>, AppError> {
    Ok(Json(state.translations.read_all()?))
}

/// PUT /api/translations - Overwrite the trees for the languages present in
/// the body; absent languages are left untouched.
pub async fn save_translations(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(trees): Json<BTreeMap<Lang, Value>>,
) -> ApiResult<()> {
    state.translations.write_all(&trees)?;
    done()
}
