// src/services/cleaner.rs

//! Product mapping normalization.

use crate::models::{CleaningConfig, ProductMapping};
use crate::utils::collapse_control_whitespace;

/// Normalizes names, drops non-HTTP URLs, and collapses duplicate names.
pub struct MappingCleaner {
    marketing_tokens: Vec<String>,
    url_prefix: String,
}

impl MappingCleaner {
    pub fn new(config: &CleaningConfig) -> Self {
        Self {
            marketing_tokens: config.marketing_tokens.clone(),
            url_prefix: config.url_prefix.clone(),
        }
    }

    /// Clean every entry in source order. A later entry whose cleaned name
    /// matches an earlier one overwrites its URL.
    pub fn clean(&self, mapping: &ProductMapping) -> ProductMapping {
        let mut cleaned = ProductMapping::new();
        for (name, url) in mapping.iter() {
            match self.clean_entry(name, url) {
                Some((name, url)) => {
                    cleaned.insert(name, url);
                }
                None => log::debug!("Dropped '{}': unsupported URL '{}'", name.trim(), url),
            }
        }
        cleaned
    }

    /// Clean a single entry, or `None` when the URL lacks the required prefix.
    pub fn clean_entry(&self, name: &str, url: &str) -> Option<(String, String)> {
        let url = collapse_control_whitespace(url, "");
        let url = url.trim();
        if !url.starts_with(&self.url_prefix) {
            return None;
        }

        Some((self.clean_name(name), url.to_string()))
    }

    /// Collapse control whitespace and strip marketing tokens.
    ///
    /// Tokens are removed as exact, case-sensitive substrings anywhere in the
    /// name, so `"NEWTON-5"` becomes `"TON-5"`. Removal is a single pass: a
    /// token joined by removing another (`"NNEWEW"` becomes `"NEW"`) is left
    /// for the next run, so cleaning is only idempotent when that cannot occur.
    pub fn clean_name(&self, name: &str) -> String {
        let mut name = collapse_control_whitespace(name, " ").trim().to_string();
        for token in &self.marketing_tokens {
            name = name.replace(token.as_str(), "");
        }
        name.trim().to_string()
    }
}

impl Default for MappingCleaner {
    fn default() -> Self {
        Self::new(&CleaningConfig::default())
    }
}
