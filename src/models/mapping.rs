// src/models/mapping.rs

//! Product name to image URL mapping.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::fs::{load_json, save_json};

/// Ordered mapping from product display name to image URL.
///
/// Inserting an existing name overwrites its URL but keeps the position of
/// the first insertion, so the last write for a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductMapping {
    entries: IndexMap<String, String>,
}

impl ProductMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry. Returns the previous URL, if any.
    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), url.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read a mapping from a JSON object file, preserving document order.
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    /// Write the mapping as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(path, self)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProductMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (name, url) in iter {
            mapping.insert(name, url);
        }
        mapping
    }
}
