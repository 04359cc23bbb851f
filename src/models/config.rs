//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::parse_selector;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Catalog page location and product markup selectors
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Image discovery and download settings
    #[serde(default)]
    pub images: ImagesConfig,

    /// Mapping normalization rules
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Output file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// A missing file is the normal case and only logged at debug level.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        if !path.as_ref().exists() {
            log::debug!("No config at {:?}; using defaults", path.as_ref());
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.page_timeout_secs == 0 {
            return Err(AppError::validation("http.page_timeout_secs must be > 0"));
        }
        if self.http.image_timeout_secs == 0 {
            return Err(AppError::validation("http.image_timeout_secs must be > 0"));
        }

        url::Url::parse(&self.catalog.url)?;
        url::Url::parse(&self.images.cdn_prefix)?;

        for selector in [
            &self.catalog.product_selector,
            &self.catalog.name_selector,
            &self.catalog.image_selector,
        ] {
            parse_selector(selector)?;
        }
        if self.catalog.image_attr.trim().is_empty() {
            return Err(AppError::validation("catalog.image_attr is empty"));
        }

        regex::Regex::new(&self.images.path_pattern)?;
        if self.images.output_dir.as_os_str().is_empty() {
            return Err(AppError::validation("images.output_dir is empty"));
        }

        if self.cleaning.url_prefix.is_empty() {
            return Err(AppError::validation("cleaning.url_prefix is empty"));
        }
        if self.cleaning.marketing_tokens.iter().any(|t| t.is_empty()) {
            return Err(AppError::validation(
                "cleaning.marketing_tokens contains an empty token",
            ));
        }

        if self.paths.raw_mapping.as_os_str().is_empty()
            || self.paths.clean_mapping.as_os_str().is_empty()
        {
            return Err(AppError::validation("paths must not be empty"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Deadline for the catalog page request
    #[serde(default = "defaults::page_timeout")]
    pub page_timeout_secs: u64,

    /// Deadline for each image request
    #[serde(default = "defaults::image_timeout")]
    pub image_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            page_timeout_secs: defaults::page_timeout(),
            image_timeout_secs: defaults::image_timeout(),
        }
    }
}

/// Catalog page location and the selectors describing one product card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Product listing page
    #[serde(default = "defaults::catalog_url")]
    pub url: String,

    /// Selector for each product container
    #[serde(default = "defaults::product_selector")]
    pub product_selector: String,

    /// Selector for the product name, relative to the container
    #[serde(default = "defaults::name_selector")]
    pub name_selector: String,

    /// Selector for the lazily-loaded image, relative to the container
    #[serde(default = "defaults::image_selector")]
    pub image_selector: String,

    /// Attribute holding the deferred image source
    #[serde(default = "defaults::image_attr")]
    pub image_attr: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: defaults::catalog_url(),
            product_selector: defaults::product_selector(),
            name_selector: defaults::name_selector(),
            image_selector: defaults::image_selector(),
            image_attr: defaults::image_attr(),
        }
    }
}

/// How image references are pulled out of the catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Regular-expression scan of the raw markup
    #[default]
    Pattern,
    /// Structured parse of the product containers
    Markup,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern => f.write_str("pattern"),
            Self::Markup => f.write_str("markup"),
        }
    }
}

impl FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pattern" => Ok(Self::Pattern),
            "markup" => Ok(Self::Markup),
            other => Err(format!(
                "unknown strategy '{other}' (expected 'pattern' or 'markup')"
            )),
        }
    }
}

/// Image discovery and download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Content-delivery host prepended to relative image paths
    #[serde(default = "defaults::cdn_prefix")]
    pub cdn_prefix: String,

    /// Regular expression matching image paths in the raw markup
    #[serde(default = "defaults::path_pattern")]
    pub path_pattern: String,

    /// Directory receiving downloaded images
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// Extraction strategy used by the image fetcher
    #[serde(default)]
    pub strategy: ExtractionStrategy,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            cdn_prefix: defaults::cdn_prefix(),
            path_pattern: defaults::path_pattern(),
            output_dir: defaults::output_dir(),
            strategy: ExtractionStrategy::default(),
        }
    }
}

/// Mapping normalization rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Substrings removed verbatim (case-sensitive) from product names
    #[serde(default = "defaults::marketing_tokens")]
    pub marketing_tokens: Vec<String>,

    /// Required prefix for a URL to be kept
    #[serde(default = "defaults::url_prefix")]
    pub url_prefix: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            marketing_tokens: defaults::marketing_tokens(),
            url_prefix: defaults::url_prefix(),
        }
    }
}

/// Output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Mapping as scraped from the catalog
    #[serde(default = "defaults::raw_mapping")]
    pub raw_mapping: PathBuf,

    /// Mapping after cleaning
    #[serde(default = "defaults::clean_mapping")]
    pub clean_mapping: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_mapping: defaults::raw_mapping(),
            clean_mapping: defaults::clean_mapping(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; catalog-scraper/0.1)".into()
    }
    pub fn page_timeout() -> u64 {
        20
    }
    pub fn image_timeout() -> u64 {
        15
    }

    // Catalog defaults
    pub fn catalog_url() -> String {
        "https://mikrotik.com/products".into()
    }
    pub fn product_selector() -> String {
        "div.product".into()
    }
    pub fn name_selector() -> String {
        "h2 a".into()
    }
    pub fn image_selector() -> String {
        "img.lazyload".into()
    }
    pub fn image_attr() -> String {
        "data-src".into()
    }

    // Image defaults
    pub fn cdn_prefix() -> String {
        "https://cdn.mikrotik.com".into()
    }
    pub fn path_pattern() -> String {
        r"/web-assets/rb_images/[0-9]+_m\.png".into()
    }
    pub fn output_dir() -> PathBuf {
        PathBuf::from("mikrotik_images")
    }

    // Cleaning defaults
    pub fn marketing_tokens() -> Vec<String> {
        vec!["NEW".into()]
    }
    pub fn url_prefix() -> String {
        "http".into()
    }

    // Path defaults
    pub fn raw_mapping() -> PathBuf {
        PathBuf::from("router_images_online.json")
    }
    pub fn clean_mapping() -> PathBuf {
        PathBuf::from("router_images_clean.json")
    }
}
