//! Bookmark entries and the persisted store that holds them.
//!
//! A bookmark pairs a short key with a link. Links are usually URLs but can be
//! any snippet of text worth pasting later.

use serde::{Deserialize, Serialize};

/// Bookmark entry as persisted in the store file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Short human label, spaces already replaced with underscores
    pub key: String,
    /// URL or arbitrary text
    pub link: String,
}

impl Bookmark {
    pub fn new(key: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            link: link.into(),
        }
    }
}

/// Normalize a user-entered key for persistence: spaces become underscores.
pub fn normalize_key(key: &str) -> String {
    key.replace(' ', "_")
}

pub mod store;

pub use store::Store;
