//! Service layer for the scraper application.
//!
//! This module contains the business logic for:
//! - Catalog parsing (`CatalogParser`)
//! - Image reference extraction (`PatternExtractor`, `MarkupExtractor`)
//! - Image downloading (`ImageDownloader`)
//! - Mapping cleaning (`MappingCleaner`)

mod catalog;
mod cleaner;
mod downloader;
mod extract;

pub use catalog::CatalogParser;
pub use cleaner::MappingCleaner;
pub use downloader::ImageDownloader;
pub use extract::{ImageExtractor, MarkupExtractor, PatternExtractor, build_extractor};
