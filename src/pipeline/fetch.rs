// src/pipeline/fetch.rs

//! Image download pipeline.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, DownloadReport};
use crate::services::{ImageDownloader, build_extractor};
use crate::utils::http::PageFetcher;
use crate::utils::report;

/// Discover image references on the catalog page and download them.
///
/// The page comes from `html_file` when given, otherwise it is fetched.
/// Only a failed page fetch or an uncreatable output directory is fatal;
/// individual downloads are tallied in the report.
pub fn run_image_fetcher(
    config: &Config,
    fetcher: &dyn PageFetcher,
    html_file: Option<&Path>,
) -> Result<DownloadReport> {
    report::header("Image Fetcher");

    let extractor = build_extractor(config.images.strategy, &config.catalog, &config.images)?;

    let html = match html_file {
        Some(path) => {
            log::info!("Reading catalog HTML from {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            let url = &config.catalog.url;
            log::info!("Fetching catalog HTML from {}", url);
            let response =
                fetcher.get(url, Duration::from_secs(config.http.page_timeout_secs))?;
            if !response.is_success() {
                log::warn!("Catalog answered HTTP {}; scanning body anyway", response.status);
            }
            response.text()
        }
    };

    let images = extractor.extract(&html);
    log::info!(
        "Found {} images ({} strategy)",
        images.len(),
        config.images.strategy
    );

    if images.is_empty() {
        log::warn!("No images found; the page may need script execution to render them");
    }

    let downloader = ImageDownloader::new(
        fetcher,
        config.images.cdn_prefix.clone(),
        config.images.output_dir.clone(),
        Duration::from_secs(config.http.image_timeout_secs),
    );
    let result = downloader.download_all(&images)?;

    report::summary(
        "Image Fetcher Results",
        &[
            ("Found", result.found.to_string()),
            ("Succeeded", result.success.to_string()),
            ("Failed", result.failed.to_string()),
            ("Elapsed", format!("{:.1}s", result.elapsed_secs())),
            ("Output", result.output_dir.display().to_string()),
        ],
    );

    Ok(result)
}
