// src/services/catalog.rs

//! Catalog page parser.
//!
//! Extracts product name / image URL pairs from the product listing markup
//! using the configured CSS selectors.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{CatalogConfig, ProductMapping, ProductRecord};
use crate::utils::parse_selector;

/// Parser for product cards on the catalog page.
pub struct CatalogParser {
    product_sel: Selector,
    name_sel: Selector,
    image_sel: Selector,
    image_attr: String,
}

impl CatalogParser {
    /// Compile the selectors from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Ok(Self {
            product_sel: parse_selector(&config.product_selector)?,
            name_sel: parse_selector(&config.name_selector)?,
            image_sel: parse_selector(&config.image_selector)?,
            image_attr: config.image_attr.clone(),
        })
    }

    /// Every complete product card, in document order.
    pub fn parse_products(&self, html: &str) -> Vec<ProductRecord> {
        let document = Html::parse_document(html);
        let mut skipped = 0usize;

        let records: Vec<ProductRecord> = document
            .select(&self.product_sel)
            .filter_map(|product| {
                let record = self.parse_product(&product);
                if record.is_none() {
                    skipped += 1;
                }
                record
            })
            .collect();

        if skipped > 0 {
            log::debug!("Skipped {} incomplete product containers", skipped);
        }
        records
    }

    /// Build the name to image URL mapping. Later duplicates overwrite earlier ones.
    pub fn parse_mapping(&self, html: &str) -> ProductMapping {
        self.parse_products(html)
            .into_iter()
            .map(|record| (record.name, record.image_url))
            .collect()
    }

    /// Extract a single product card. Returns `None` when the name element,
    /// the image element, or a non-empty image attribute is missing.
    fn parse_product(&self, product: &ElementRef) -> Option<ProductRecord> {
        let name_elem = product.select(&self.name_sel).next()?;
        let image_elem = product.select(&self.image_sel).next()?;

        let name = name_elem.text().collect::<String>().trim().to_string();
        let image_url = image_elem
            .value()
            .attr(&self.image_attr)
            .filter(|src| !src.is_empty())?;

        Some(ProductRecord {
            name,
            image_url: image_url.to_string(),
        })
    }
}
