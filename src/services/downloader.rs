// src/services/downloader.rs

//! Sequential image downloader.
//!
//! Downloads one image at a time in reference order. A failed item is
//! counted and logged, never fatal to the batch.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::models::{DownloadOutcome, DownloadReport, ImageRef};
use crate::utils::fs::{display_path, ensure_dir};
use crate::utils::http::PageFetcher;

/// Service for downloading discovered images into a directory.
pub struct ImageDownloader<'a> {
    fetcher: &'a dyn PageFetcher,
    cdn_prefix: String,
    output_dir: PathBuf,
    timeout: Duration,
}

impl<'a> ImageDownloader<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        cdn_prefix: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            cdn_prefix: cdn_prefix.into(),
            output_dir: output_dir.into(),
            timeout,
        }
    }

    /// Download every reference in order and tally the outcomes.
    ///
    /// The output directory is created on the first non-empty batch; failing
    /// to create it is the only error returned. Files are named by basename,
    /// so a later reference whose basename was already saved in this run is
    /// not fetched and counts as a failure instead of overwriting it.
    pub fn download_all(&self, images: &BTreeSet<ImageRef>) -> Result<DownloadReport> {
        let mut report = DownloadReport::new(display_path(&self.output_dir));
        report.found = images.len();

        if images.is_empty() {
            report.finish();
            return Ok(report);
        }

        ensure_dir(&self.output_dir)?;

        let mut saved_names: HashSet<String> = HashSet::new();

        for (idx, image) in images.iter().enumerate() {
            let position = idx + 1;
            let file_name = image.file_name();
            let outcome = match &file_name {
                Some(name) if saved_names.contains(name) => DownloadOutcome::Failed(format!(
                    "duplicate file name '{name}' already saved in this run"
                )),
                _ => self.download_one(image),
            };
            if let Some(name) = file_name.as_ref().filter(|_| outcome.is_success()) {
                saved_names.insert(name.clone());
            }
            let label = file_name.unwrap_or_else(|| image.to_string());

            match &outcome {
                DownloadOutcome::Saved { bytes, .. } => {
                    log::info!("({}) {} saved ({} bytes)", position, label, bytes);
                }
                DownloadOutcome::HttpStatus(status) => {
                    log::warn!("({}) {} failed: HTTP {}", position, label, status);
                }
                DownloadOutcome::Failed(error) => {
                    log::warn!("({}) {} error: {}", position, label, error);
                }
            }
            report.record(&outcome);
        }

        report.finish();
        Ok(report)
    }

    /// Download a single image. Every failure is folded into the outcome.
    pub fn download_one(&self, image: &ImageRef) -> DownloadOutcome {
        let Some(file_name) = image.file_name() else {
            return DownloadOutcome::Failed(format!("no file name in '{image}'"));
        };

        let url = image.download_url(&self.cdn_prefix);
        let response = match self.fetcher.get(&url, self.timeout) {
            Ok(response) => response,
            Err(e) => return DownloadOutcome::Failed(e.to_string()),
        };

        if response.status != 200 {
            return DownloadOutcome::HttpStatus(response.status);
        }

        let path = self.output_dir.join(&file_name);
        match fs::write(&path, &response.body) {
            Ok(()) => DownloadOutcome::Saved {
                path,
                bytes: response.body.len(),
            },
            Err(e) => DownloadOutcome::Failed(format!("write {}: {}", path.display(), e)),
        }
    }
}
