//! Pipeline entry points for scraper operations.
//!
//! - `run_mapper`: Fetch the catalog and write the raw product mapping
//! - `run_image_fetcher`: Download every image referenced by the catalog
//! - `run_cleaner`: Normalize the raw mapping into the clean mapping
//! - `run_pipeline`: All of the above, in order

pub mod clean;
pub mod fetch;
pub mod map;

pub use clean::run_cleaner;
pub use fetch::run_image_fetcher;
pub use map::run_mapper;

use crate::error::Result;
use crate::models::Config;
use crate::utils::http::PageFetcher;

/// Run map, fetch-images (unless skipped) and clean in sequence.
pub fn run_pipeline(config: &Config, fetcher: &dyn PageFetcher, skip_images: bool) -> Result<()> {
    let total = if skip_images { 2 } else { 3 };
    let mut step = 1;

    log::info!("[STEP {}/{}] Mapping catalog products...", step, total);
    run_mapper(config, fetcher, None)?;
    step += 1;

    if !skip_images {
        log::info!("[STEP {}/{}] Downloading images...", step, total);
        run_image_fetcher(config, fetcher, None)?;
        step += 1;
    }

    log::info!("[STEP {}/{}] Cleaning mapping...", step, total);
    run_cleaner(config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductMapping;
    use crate::utils::http::testing::FakeFetcher;

    const CATALOG: &str = r#"
        <div class="product">
          <h2><a>hAP ax lite NEW</a></h2>
          <img class="lazyload" data-src="https://cdn.example.com/web-assets/rb_images/2300_m.png">
        </div>
        <div class="product">
          <h2><a>hAP ax lite</a></h2>
          <img class="lazyload" data-src="https://cdn.example.com/web-assets/rb_images/2301_m.png">
        </div>
        <div class="product">
          <h2><a>Legacy</a></h2>
          <img class="lazyload" data-src="/web-assets/rb_images/1000_m.png">
        </div>
    "#;

    #[test]
    fn test_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.catalog.url = "http://catalog.test/products".into();
        config.images.cdn_prefix = "https://cdn.example.com".into();
        config.images.output_dir = dir.path().join("images");
        config.paths.raw_mapping = dir.path().join("raw.json");
        config.paths.clean_mapping = dir.path().join("clean.json");

        let fetcher = FakeFetcher::new()
            .with("http://catalog.test/products", 200, CATALOG)
            .with("https://cdn.example.com/web-assets/rb_images/1000_m.png", 200, b"a".to_vec())
            .with("https://cdn.example.com/web-assets/rb_images/2300_m.png", 200, b"b".to_vec())
            .with("https://cdn.example.com/web-assets/rb_images/2301_m.png", 503, Vec::new());

        run_pipeline(&config, &fetcher, false).unwrap();

        let raw = ProductMapping::load(&config.paths.raw_mapping).unwrap();
        assert_eq!(raw.len(), 3);

        let clean = ProductMapping::load(&config.paths.clean_mapping).unwrap();
        assert_eq!(clean.len(), 1);
        assert_eq!(
            clean.get("hAP ax lite"),
            Some("https://cdn.example.com/web-assets/rb_images/2301_m.png")
        );

        assert!(config.images.output_dir.join("1000_m.png").exists());
        assert!(config.images.output_dir.join("2300_m.png").exists());
        assert!(!config.images.output_dir.join("2301_m.png").exists());
    }

    #[test]
    fn test_pipeline_skip_images() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.catalog.url = "http://catalog.test/products".into();
        config.images.output_dir = dir.path().join("images");
        config.paths.raw_mapping = dir.path().join("raw.json");
        config.paths.clean_mapping = dir.path().join("clean.json");

        let fetcher = FakeFetcher::new().with("http://catalog.test/products", 200, CATALOG);
        run_pipeline(&config, &fetcher, true).unwrap();

        assert_eq!(fetcher.requested_urls().len(), 1);
        assert!(config.paths.clean_mapping.exists());
        assert!(!config.images.output_dir.exists());
    }
}
