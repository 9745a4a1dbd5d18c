//! Named content collections and the fixed whitelist.

use serde_json::{Map, Value};

/// A named content collection backed by one JSON file.
///
/// Every collection holds an array of records except [`Collection::Settings`],
/// which is a single mapping with no id concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Masterclasses,
    Rooms,
    Reviews,
    Gallery,
    Packages,
    Masters,
    Settings,
}

impl Collection {
    /// The full whitelist. Any name outside this set is rejected with 404.
    pub const ALL: [Collection; 7] = [
        Collection::Masterclasses,
        Collection::Rooms,
        Collection::Reviews,
        Collection::Gallery,
        Collection::Packages,
        Collection::Masters,
        Collection::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Masterclasses => "masterclasses",
            Collection::Rooms => "rooms",
            Collection::Reviews => "reviews",
            Collection::Gallery => "gallery",
            Collection::Packages => "packages",
            Collection::Masters => "masters",
            Collection::Settings => "settings",
        }
    }

    pub fn from_str(name: &str) -> Option<Self> {
        match name {
            "masterclasses" => Some(Collection::Masterclasses),
            "rooms" => Some(Collection::Rooms),
            "reviews" => Some(Collection::Reviews),
            "gallery" => Some(Collection::Gallery),
            "packages" => Some(Collection::Packages),
            "masters" => Some(Collection::Masters),
            "settings" => Some(Collection::Settings),
            _ => None,
        }
    }

    /// Whether this collection holds a list of records.
    pub fn is_list(&self) -> bool {
        !matches!(self, Collection::Settings)
    }

    /// The value an absent or unreadable backing file decodes to.
    pub fn empty_value(&self) -> Value {
        if self.is_list() {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        }
    }
}
