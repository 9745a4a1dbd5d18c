//! Site languages and locale resolution for stored text fields.
//!
//! Text fields in content records are either legacy plain strings or
//! language-keyed mappings. Resolution order is requested locale, then
//! Russian, then the empty string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A site language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ru,
    Kg,
    En,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Ru, Lang::Kg, Lang::En];

    /// The language every localized field falls back to.
    pub const FALLBACK: Lang = Lang::Ru;

    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Kg => "kg",
            Lang::En => "en",
        }
    }

    pub fn from_str(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Lang::Ru),
            "kg" => Some(Lang::Kg),
            "en" => Some(Lang::En),
            _ => None,
        }
    }
}

/// A text value as stored in content records.
///
/// Records written before the site went multilingual hold plain strings;
/// newer records hold a mapping from language code to string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    ByLanguage(BTreeMap<Lang, String>),
}

impl LocalizedText {
    /// Resolve the display string for `lang`.
    pub fn resolve(&self, lang: Lang) -> &str {
        match self {
            LocalizedText::Plain(text) => text,
            LocalizedText::ByLanguage(by_lang) => by_lang
                .get(&lang)
                .or_else(|| by_lang.get(&Lang::FALLBACK))
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

/// Resolve an optional text value, treating absence as the empty string.
pub fn resolve(value: Option<&LocalizedText>, lang: Lang) -> String {
    value.map(|v| v.resolve(lang).to_string()).unwrap_or_default()
}

/// Project every localized field in `value` to a plain string for `lang`.
///
/// Walks arrays and objects; an object whose keys are all language codes and
/// whose values are all strings is treated as a localized field and collapses
/// to its resolved string. Everything else passes through untouched.
pub fn project_value(value: Value, lang: Lang) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| project_value(item, lang))
                .collect(),
        ),
        Value::Object(map) => {
            if is_localized_map(&map) {
                let text = serde_json::from_value(Value::Object(map)).ok();
                Value::String(resolve(text.as_ref(), lang))
            } else {
                Value::Object(
                    map.into_iter()
                        .map(|(key, field)| (key, project_value(field, lang)))
                        .collect(),
                )
            }
        }
        other => other,
    }
}

fn is_localized_map(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .iter()
            .all(|(key, value)| Lang::from_str(key).is_some() && value.is_string())
}
