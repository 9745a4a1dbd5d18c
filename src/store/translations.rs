//! UI translation trees, one JSON file per language.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::AppError;
use crate::models::Lang;

/// Admin-editable translation strings.
///
/// Unlike the content store, read failures here are NOT swallowed: a missing
/// language file surfaces as a 500, because serving a partial translation set
/// is worse than an explicit error.
pub struct TranslationStore {
    dir: PathBuf,
}

impl TranslationStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, lang: Lang) -> PathBuf {
        self.dir.join(format!("{}.json", lang.as_str()))
    }

    /// Read the full tree for every language.
    pub fn read_all(&self) -> Result<BTreeMap<Lang, Value>, AppError> {
        let mut trees = BTreeMap::new();
        for lang in Lang::ALL {
            let path = self.path(lang);
            let raw = fs::read_to_string(&path).map_err(|e| {
                AppError::Persistence(format!(
                    "Failed to read {} translations: {}",
                    lang.as_str(),
                    e
                ))
            })?;
            let tree = serde_json::from_str(&raw).map_err(|e| {
                AppError::Persistence(format!(
                    "Failed to parse {} translations: {}",
                    lang.as_str(),
                    e
                ))
            })?;
            trees.insert(lang, tree);
        }
        Ok(trees)
    }

    /// Fully overwrite the file for each language present in the input.
    /// Languages absent from the input are left untouched on disk.
    pub fn write_all(&self, trees: &BTreeMap<Lang, Value>) -> Result<(), AppError> {
        for (lang, tree) in trees {
            let pretty = serde_json::to_string_pretty(tree)?;
            fs::write(self.path(*lang), pretty)?;
        }
        Ok(())
    }
}
