//! Persistence module for JSON-file-backed content.
//!
//! One pretty-printed JSON file per collection and per translation language.
//! Files are the source of truth; nothing is cached between requests.

mod content;
mod translations;

pub use content::*;
pub use translations::*;
