// src/pipeline/clean.rs

//! Mapping cleaning pipeline.

use crate::error::Result;
use crate::models::{Config, ProductMapping};
use crate::services::MappingCleaner;
use crate::utils::fs::display_path;
use crate::utils::report;

/// Read the raw mapping, clean it, and write the clean mapping.
pub fn run_cleaner(config: &Config) -> Result<ProductMapping> {
    report::header("Mapping Cleaner");

    let input = &config.paths.raw_mapping;
    let output = &config.paths.clean_mapping;

    let raw = ProductMapping::load(input)?;
    log::info!("Loaded {} entries from {}", raw.len(), input.display());

    let cleaned = MappingCleaner::new(&config.cleaning).clean(&raw);
    cleaned.save(output)?;

    log::info!(
        "Cleaned {} entries ({} dropped or merged) into {}",
        cleaned.len(),
        raw.len() - cleaned.len(),
        display_path(output).display()
    );

    Ok(cleaned)
}
