//! Data models for the Skeramos backend.
//!
//! Content records are free-form JSON mappings; the typed surface here is the
//! collection whitelist, the language set, and the localized-text variant.

mod collection;
mod locale;
mod requests;

pub use collection::*;
pub use locale::*;
pub use requests::*;
