// src/pipeline/map.rs

//! Catalog mapping pipeline.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, ProductMapping};
use crate::services::CatalogParser;
use crate::utils::fs::display_path;
use crate::utils::http::PageFetcher;
use crate::utils::report;

/// Fetch the catalog page and write the raw product mapping.
///
/// Any transport failure or non-success status aborts before anything is
/// written. When `save_html` is given the page body is kept for offline use.
pub fn run_mapper(
    config: &Config,
    fetcher: &dyn PageFetcher,
    save_html: Option<&Path>,
) -> Result<ProductMapping> {
    report::header("Catalog Mapper");

    let parser = CatalogParser::new(&config.catalog)?;
    let url = &config.catalog.url;
    log::info!("Fetching product data from {}", url);

    let response = fetcher
        .get(url, Duration::from_secs(config.http.page_timeout_secs))?
        .error_for_status(url)?;
    let html = response.text();

    if let Some(path) = save_html {
        fs::write(path, &html)?;
        log::info!("Catalog HTML saved to {}", path.display());
    }

    let mapping = parser.parse_mapping(&html);
    log::info!("Extracted {} products", mapping.len());

    let output = &config.paths.raw_mapping;
    mapping.save(output)?;
    log::info!("Mapping saved to {}", display_path(output).display());

    Ok(mapping)
}
