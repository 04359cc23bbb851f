// src/models/mod.rs

//! Domain models for the scraper application.

mod config;
mod image;
mod mapping;

// Re-export all public types
pub use config::{
    CatalogConfig, CleaningConfig, Config, ExtractionStrategy, HttpConfig, ImagesConfig,
    PathsConfig,
};
pub use image::{DownloadOutcome, DownloadReport, ImageRef};
pub use mapping::ProductMapping;

/// A single product card extracted from the catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub image_url: String,
}
