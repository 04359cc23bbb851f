// src/models/image.rs

//! Image references and per-run download bookkeeping.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// A reference to an image found in the catalog page.
///
/// Either a host-relative path (`/web-assets/rb_images/1234_m.png`) found by
/// pattern matching, or an absolute URL found by structured parsing.
/// Ordering is plain string ordering, which fixes the download order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference already carries a scheme.
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Full download URL, prefixing relative paths with the CDN host.
    pub fn download_url(&self, cdn_prefix: &str) -> String {
        if self.is_absolute() {
            self.0.clone()
        } else if self.0.starts_with('/') {
            format!("{}{}", cdn_prefix.trim_end_matches('/'), self.0)
        } else {
            format!("{}/{}", cdn_prefix.trim_end_matches('/'), self.0)
        }
    }

    /// Last path segment, without query string or fragment.
    ///
    /// `None` when the path ends in `/` or an absolute URL has no path.
    pub fn file_name(&self) -> Option<String> {
        if self.is_absolute() {
            let url = url::Url::parse(&self.0).ok()?;
            let last = url.path_segments()?.next_back()?;
            return (!last.is_empty()).then(|| last.to_string());
        }

        let path = self.0.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of downloading a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Body written to disk
    Saved { path: PathBuf, bytes: usize },
    /// Server answered with something other than 200
    HttpStatus(u16),
    /// Transport or write failure
    Failed(String),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Tally of an image fetcher run.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub found: usize,
    pub success: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DownloadReport {
    pub fn new(output_dir: PathBuf) -> Self {
        let now = Utc::now();
        Self {
            found: 0,
            success: 0,
            failed: 0,
            output_dir,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn record(&mut self, outcome: &DownloadOutcome) {
        if outcome.is_success() {
            self.success += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}
