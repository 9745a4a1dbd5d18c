//! File-backed content collection store.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::Collection;

/// Data access for content collections.
///
/// The API layer only sees this trait, so the file-backed store can be
/// swapped for an embedded or client-server database without touching the
/// endpoint contract.
pub trait ContentRepository: Send + Sync {
    /// Load a collection. Missing or unparseable files decode to the empty
    /// list (or empty mapping for settings) so public reads stay available.
    fn read(&self, collection: Collection) -> Value;

    /// Overwrite a collection's backing file with pretty-printed JSON.
    fn write(&self, collection: Collection, data: &Value) -> Result<(), AppError>;

    /// Append a record with a freshly assigned id and return it as stored.
    /// For settings, shallow-merge into the single mapping instead.
    fn insert(&self, collection: Collection, record: Map<String, Value>)
        -> Result<Value, AppError>;

    /// Shallow-merge a patch over the record whose id matches the patch's id.
    /// For settings, always merges; there is no id concept.
    fn update(&self, collection: Collection, patch: Map<String, Value>)
        -> Result<Value, AppError>;

    /// Remove the record with the given id.
    fn remove(&self, collection: Collection, id: &str) -> Result<(), AppError>;
}

/// [`ContentRepository`] over one JSON file per collection.
///
/// No locking: two concurrent writers to the same collection can race and
/// the last write wins at the file level. The admin surface is a single
/// trusted operator, so the race is an accepted limitation.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection.as_str()))
    }

    fn merge_settings(&self, patch: Map<String, Value>) -> Result<Value, AppError> {
        let mut current = match self.read(Collection::Settings) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            current.insert(key, value);
        }
        let merged = Value::Object(current);
        self.write(Collection::Settings, &merged)?;
        Ok(merged)
    }
}

impl ContentRepository for FileStore {
    fn read(&self, collection: Collection) -> Value {
        let path = self.path(collection);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return collection.empty_value(),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to parse {:?}, serving empty: {}", path, e);
                collection.empty_value()
            }
        }
    }

    fn write(&self, collection: Collection, data: &Value) -> Result<(), AppError> {
        let pretty = serde_json::to_string_pretty(data)?;
        fs::write(self.path(collection), pretty)?;
        Ok(())
    }

    fn insert(
        &self,
        collection: Collection,
        mut record: Map<String, Value>,
    ) -> Result<Value, AppError> {
        if collection == Collection::Settings {
            return self.merge_settings(record);
        }

        let mut items = as_list(self.read(collection));
        // The server owns id assignment; a client-supplied id is discarded.
        record.insert("id".to_string(), Value::String(next_id(&items)));
        let stored = Value::Object(record);
        items.push(stored.clone());
        self.write(collection, &Value::Array(items))?;
        Ok(stored)
    }

    fn update(
        &self,
        collection: Collection,
        patch: Map<String, Value>,
    ) -> Result<Value, AppError> {
        if collection == Collection::Settings {
            return self.merge_settings(patch);
        }

        let id = patch
            .get("id")
            .and_then(id_string)
            .ok_or_else(|| AppError::Validation("id is required".to_string()))?;

        let mut items = as_list(self.read(collection));
        let index = items
            .iter()
            .position(|item| record_id(item).as_deref() == Some(id.as_str()))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No record with id {} in {}",
                    id,
                    collection.as_str()
                ))
            })?;

        if let Value::Object(fields) = &mut items[index] {
            for (key, value) in patch {
                fields.insert(key, value);
            }
        }
        let merged = items[index].clone();
        self.write(collection, &Value::Array(items))?;
        Ok(merged)
    }

    fn remove(&self, collection: Collection, id: &str) -> Result<(), AppError> {
        if collection == Collection::Settings {
            return Err(AppError::Validation(
                "settings entries cannot be deleted".to_string(),
            ));
        }

        let items = as_list(self.read(collection));
        let before = items.len();
        let remaining: Vec<Value> = items
            .into_iter()
            .filter(|item| record_id(item).as_deref() != Some(id))
            .collect();

        if remaining.len() == before {
            return Err(AppError::NotFound(format!(
                "No record with id {} in {}",
                id,
                collection.as_str()
            )));
        }
        self.write(collection, &Value::Array(remaining))
    }
}

fn as_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Next id: one past the largest numeric id already present, as a decimal
/// string. Empty collections and non-numeric ids count as zero.
fn next_id(items: &[Value]) -> String {
    let max = items
        .iter()
        .filter_map(record_id)
        .filter_map(|id| id.parse::<i64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

fn record_id(item: &Value) -> Option<String> {
    item.get("id").and_then(id_string)
}

fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path()).expect("Failed to init store");
        (dir, store)
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let (_dir, store) = store();
        assert_eq!(store.read(Collection::Rooms), json!([]));
        assert_eq!(store.read(Collection::Settings), json!({}));
    }

    #[test]
    fn test_read_corrupt_file_is_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join("rooms.json"), "{not json").unwrap();
        assert_eq!(store.read(Collection::Rooms), json!([]));
    }

    #[test]
    fn test_insert_assigns_first_id() {
        let (_dir, store) = store();
        let stored = store
            .insert(Collection::Masterclasses, map(json!({"title": "Test"})))
            .unwrap();
        assert_eq!(stored["id"], "1");
        assert_eq!(stored["title"], "Test");
        assert_eq!(store.read(Collection::Masterclasses), json!([stored]));
    }

    #[test]
    fn test_insert_skips_non_numeric_ids() {
        let (_dir, store) = store();
        store
            .write(
                Collection::Reviews,
                &json!([{"id": "3"}, {"id": "7"}, {"id": "x"}]),
            )
            .unwrap();
        let stored = store
            .insert(Collection::Reviews, map(json!({"author": "A"})))
            .unwrap();
        assert_eq!(stored["id"], "8");
    }

    #[test]
    fn test_insert_ignores_client_id() {
        let (_dir, store) = store();
        let stored = store
            .insert(Collection::Rooms, map(json!({"id": "999", "name": "Suite"})))
            .unwrap();
        assert_eq!(stored["id"], "1");
    }

    #[test]
    fn test_update_merges_shallowly() {
        let (_dir, store) = store();
        store
            .write(
                Collection::Rooms,
                &json!([{"id": "1", "name": "Suite", "floor": 2}]),
            )
            .unwrap();
        let merged = store
            .update(Collection::Rooms, map(json!({"id": "1", "name": "Loft"})))
            .unwrap();
        assert_eq!(merged, json!({"id": "1", "name": "Loft", "floor": 2}));
    }

    #[test]
    fn test_update_unknown_id_not_found() {
        let (_dir, store) = store();
        store.write(Collection::Rooms, &json!([{"id": "1"}])).unwrap();
        let err = store
            .update(Collection::Rooms, map(json!({"id": "2", "name": "x"})))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_update_without_id_rejected() {
        let (_dir, store) = store();
        let err = store
            .update(Collection::Rooms, map(json!({"name": "x"})))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_settings_merge_accumulates() {
        let (_dir, store) = store();
        store
            .update(Collection::Settings, map(json!({"a": 1})))
            .unwrap();
        let merged = store
            .update(Collection::Settings, map(json!({"b": 2})))
            .unwrap();
        assert_eq!(merged, json!({"a": 1, "b": 2}));
        assert_eq!(store.read(Collection::Settings), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_settings_merge_replaces_nested_wholesale() {
        let (_dir, store) = store();
        store
            .update(Collection::Settings, map(json!({"hero": {"a": 1, "b": 2}})))
            .unwrap();
        store
            .update(Collection::Settings, map(json!({"hero": {"c": 3}})))
            .unwrap();
        assert_eq!(store.read(Collection::Settings), json!({"hero": {"c": 3}}));
    }

    #[test]
    fn test_remove_filters_by_id() {
        let (_dir, store) = store();
        store
            .write(Collection::Gallery, &json!([{"id": "1"}, {"id": "2"}]))
            .unwrap();
        store.remove(Collection::Gallery, "1").unwrap();
        assert_eq!(store.read(Collection::Gallery), json!([{"id": "2"}]));
    }

    #[test]
    fn test_remove_missing_id_leaves_file_untouched() {
        let (dir, store) = store();
        store
            .write(Collection::Gallery, &json!([{"id": "1"}]))
            .unwrap();
        let before = fs::read(dir.path().join("gallery.json")).unwrap();

        let err = store.remove(Collection::Gallery, "999").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let after = fs::read(dir.path().join("gallery.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_from_settings_rejected() {
        let (_dir, store) = store();
        let err = store.remove(Collection::Settings, "1").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    /// The documented read-modify-write race: two inserts that both read the
    /// collection before either writes can assign the same id.
    #[test]
    fn test_interleaved_inserts_duplicate_ids() {
        let (_dir, store) = store();

        // Both writers snapshot the empty collection and compute id "1".
        let snapshot_a = as_list(store.read(Collection::Reviews));
        let snapshot_b = as_list(store.read(Collection::Reviews));
        let id_a = next_id(&snapshot_a);
        let id_b = next_id(&snapshot_b);
        assert_eq!(id_a, id_b);

        // Writer A appends and persists first.
        let mut items = snapshot_a;
        items.push(json!({"id": id_a, "author": "a"}));
        store
            .write(Collection::Reviews, &Value::Array(items))
            .unwrap();

        // Writer B appends its stale-id record to the now-current file.
        let mut items = as_list(store.read(Collection::Reviews));
        items.push(json!({"id": id_b, "author": "b"}));
        store
            .write(Collection::Reviews, &Value::Array(items))
            .unwrap();

        let final_state = as_list(store.read(Collection::Reviews));
        let ids: Vec<_> = final_state.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec!["1", "1"]);
    }

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }
}
