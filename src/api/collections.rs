//! Content collection API endpoints.
//!
//! Reads are public; every mutation requires an admin session. Collection
//! names outside the whitelist are 404 on every verb.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{Map, Value};

use super::{done, success, ApiResult};
use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::models::{project_value, Collection, DeleteParams, Lang, LocaleQuery};
use crate::AppState;

fn lookup(name: &str) -> Result<Collection, AppError> {
    Collection::from_str(name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown collection '{}'", name)))
}

/// GET /api/collections/{name} - Read a collection.
///
/// Returns the bare JSON array (or the settings mapping). With `?locale=xx`,
/// localized fields are projected to plain strings for that language.
pub async fn get_collection(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Value>, AppError> {
    let collection = lookup(&name)?;
    let mut data = state.store.read(collection);
    if let Some(code) = query.locale.as_deref() {
        let locale = Lang::from_str(code)
            .ok_or_else(|| AppError::Validation(format!("Unknown locale '{}'", code)))?;
        data = project_value(data, locale);
    }
    Ok(Json(data))
}

/// POST /api/collections/{name} - Insert a record.
pub async fn create_record(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(record): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    let collection = lookup(&name)?;
    let stored = state.store.insert(collection, record)?;
    success(stored)
}

/// PUT /api/collections/{name} - Merge a patch over the record with the
/// patch's id (settings merges without an id).
pub async fn update_record(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    let collection = lookup(&name)?;
    let merged = state.store.update(collection, patch)?;
    success(merged)
}

/// DELETE /api/collections/{name}?id= - Remove a record by id.
pub async fn delete_record(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<()> {
    let collection = lookup(&name)?;
    let id = params
        .id
        .ok_or_else(|| AppError::Validation("id query parameter is required".to_string()))?;
    state.store.remove(collection, &id)?;
    done()
}
