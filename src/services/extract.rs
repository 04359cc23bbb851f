// src/services/extract.rs

//! Image reference extraction strategies.
//!
//! Both strategies work on the raw page text and neither executes scripts:
//! a catalog that renders its product grid client-side yields no references.

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::Result;
use crate::models::{CatalogConfig, ExtractionStrategy, ImageRef, ImagesConfig};
use crate::services::CatalogParser;

/// Pulls image references out of catalog page markup.
pub trait ImageExtractor {
    /// Distinct references, sorted.
    fn extract(&self, html: &str) -> BTreeSet<ImageRef>;
}

/// Scans raw markup with a regular expression for image paths.
///
/// Depends on the host's file naming convention and breaks silently if it
/// changes.
pub struct PatternExtractor {
    pattern: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl ImageExtractor for PatternExtractor {
    fn extract(&self, html: &str) -> BTreeSet<ImageRef> {
        self.pattern
            .find_iter(html)
            .map(|m| ImageRef::new(m.as_str()))
            .collect()
    }
}

/// Reuses the catalog parser and keeps the image URL of every complete product.
pub struct MarkupExtractor {
    parser: CatalogParser,
}

impl MarkupExtractor {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Ok(Self {
            parser: CatalogParser::new(config)?,
        })
    }
}

impl ImageExtractor for MarkupExtractor {
    fn extract(&self, html: &str) -> BTreeSet<ImageRef> {
        self.parser
            .parse_products(html)
            .into_iter()
            .map(|record| ImageRef::new(record.image_url))
            .collect()
    }
}

/// Build the extractor selected by `strategy`.
pub fn build_extractor(
    strategy: ExtractionStrategy,
    catalog: &CatalogConfig,
    images: &ImagesConfig,
) -> Result<Box<dyn ImageExtractor>> {
    let extractor: Box<dyn ImageExtractor> = match strategy {
        ExtractionStrategy::Pattern => Box::new(PatternExtractor::new(&images.path_pattern)?),
        ExtractionStrategy::Markup => Box::new(MarkupExtractor::new(catalog)?),
    };
    Ok(extractor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="product">
          <h2><a>hEX refresh</a></h2>
          <img class="lazyload" data-src="/web-assets/rb_images/2302_m.png">
        </div>
        <div class="product">
          <h2><a>hAP ax3</a></h2>
          <img class="lazyload" data-src="/web-assets/rb_images/2166_m.png">
        </div>
        <link rel="preload" href="/web-assets/rb_images/2166_m.png">
        <img src="/web-assets/rb_images/2166_l.png">
        <img src="/web-assets/rb_images/abc_m.png">
        <img src="/web-assets/other/1000_m.png">
    "#;

    fn default_pattern() -> PatternExtractor {
        PatternExtractor::new(&ImagesConfig::default().path_pattern).unwrap()
    }

    #[test]
    fn test_pattern_extractor_dedups_and_sorts() {
        let refs: Vec<_> = default_pattern().extract(PAGE).into_iter().collect();
        assert_eq!(
            refs,
            vec![
                ImageRef::new("/web-assets/rb_images/2166_m.png"),
                ImageRef::new("/web-assets/rb_images/2302_m.png"),
            ]
        );
    }

    #[test]
    fn test_pattern_extractor_no_matches() {
        let html = r#"<div id="root"></div><script>render()</script>"#;
        assert!(default_pattern().extract(html).is_empty());
    }

    #[test]
    fn test_pattern_extractor_invalid_pattern() {
        assert!(PatternExtractor::new("([0-9]+").is_err());
    }

    #[test]
    fn test_markup_extractor_uses_product_cards() {
        let extractor = MarkupExtractor::new(&CatalogConfig::default()).unwrap();
        let refs: Vec<_> = extractor
            .extract(PAGE)
            .into_iter()
            .map(|r| r.as_str().to_string())
            .collect();
        assert_eq!(
            refs,
            vec![
                "/web-assets/rb_images/2166_m.png".to_string(),
                "/web-assets/rb_images/2302_m.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_build_extractor_by_strategy() {
        let catalog = CatalogConfig::default();
        let images = ImagesConfig::default();
        let pattern = build_extractor(ExtractionStrategy::Pattern, &catalog, &images).unwrap();
        let markup = build_extractor(ExtractionStrategy::Markup, &catalog, &images).unwrap();
        assert_eq!(pattern.extract(PAGE).len(), 2);
        assert_eq!(markup.extract(PAGE).len(), 2);
    }
}
