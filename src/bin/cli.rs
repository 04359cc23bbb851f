//! Catalog Scraper CLI
//!
//! Runs the mapper, image fetcher and cleaner as separate batch jobs, or all
//! three in sequence.

use std::path::PathBuf;

use catalog_scraper::{
    error::Result,
    models::{Config, ExtractionStrategy},
    pipeline,
    utils::http::HttpClient,
};
use clap::{Parser, Subcommand};

/// Catalog Scraper - product image harvester
#[derive(Parser, Debug)]
#[command(
    name = "catalog-scraper",
    version,
    about = "Scrapes a product catalog for images and cleans the product mapping"
)]
struct Cli {
    /// Path to the TOML configuration file (built-in defaults if absent)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the catalog and write the product name to image URL mapping
    Map {
        /// Output file for the raw mapping
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also save the fetched catalog HTML to this file
        #[arg(long)]
        save_html: Option<PathBuf>,
    },

    /// Download every image referenced by the catalog
    FetchImages {
        /// Scan a saved catalog HTML file instead of fetching the page
        #[arg(long)]
        html: Option<PathBuf>,

        /// Directory receiving the images
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Extraction strategy: "pattern" or "markup"
        #[arg(long)]
        strategy: Option<ExtractionStrategy>,
    },

    /// Normalize the raw mapping into the clean mapping
    Clean {
        /// Raw mapping to read
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Clean mapping to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run full pipeline: Map → Fetch images → Clean
    Pipeline {
        /// Skip the image download step
        #[arg(long)]
        skip_images: bool,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Catalog Scraper starting...");

    // Load configuration
    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Map { output, save_html } => {
            if let Some(path) = output {
                config.paths.raw_mapping = path;
            }
            config.validate()?;
            let client = HttpClient::new(&config.http)?;
            pipeline::run_mapper(&config, &client, save_html.as_deref())?;
        }

        Command::FetchImages {
            html,
            output_dir,
            strategy,
        } => {
            if let Some(path) = output_dir {
                config.images.output_dir = path;
            }
            if let Some(strategy) = strategy {
                config.images.strategy = strategy;
            }
            config.validate()?;
            let client = HttpClient::new(&config.http)?;
            pipeline::run_image_fetcher(&config, &client, html.as_deref())?;
        }

        Command::Clean { input, output } => {
            if let Some(path) = input {
                config.paths.raw_mapping = path;
            }
            if let Some(path) = output {
                config.paths.clean_mapping = path;
            }
            config.validate()?;
            pipeline::run_cleaner(&config)?;
        }

        Command::Pipeline { skip_images } => {
            config.validate()?;
            let client = HttpClient::new(&config.http)?;
            pipeline::run_pipeline(&config, &client, skip_images)?;
            log::info!("Pipeline complete!");
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!("✓ Config OK");
            log::info!("    Catalog URL: {}", config.catalog.url);
            log::info!("    CDN prefix: {}", config.images.cdn_prefix);
            log::info!("    Strategy: {}", config.images.strategy);
            log::info!(
                "    Timeouts: page {}s, image {}s",
                config.http.page_timeout_secs,
                config.http.image_timeout_secs
            );
            log::info!("    Image directory: {}", config.images.output_dir.display());
            log::info!("    Raw mapping: {}", config.paths.raw_mapping.display());
            log::info!("    Clean mapping: {}", config.paths.clean_mapping.display());
        }
    }

    log::info!("Done!");

    Ok(())
}
