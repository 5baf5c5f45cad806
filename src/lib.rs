//! Product Image Resolver
//!
//! Discovers every plausible product image reference on a product page,
//! rewrites each into its full-size canonical URL, drops near-duplicates and
//! non-product assets, and returns a bounded list ranked by relevance.
//!
//! ```no_run
//! use product_image_resolver::infrastructure::parsing::ImageResolver;
//!
//! let resolver = ImageResolver::new()?;
//! let images = resolver.resolve_html("<img src='/img/71x71/p123.jpg'>", "https://shop.example/p/123")?;
//! assert_eq!(images, vec!["https://shop.example/img/p123.jpg"]);
//! # Ok::<(), product_image_resolver::infrastructure::parsing::ParsingError>(())
//! ```

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

use anyhow::{Context, Result, bail};
use application::ImageBatchService;
use infrastructure::{ConfigManager, HttpClient, ImageResolver};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command line arguments: `[--config PATH] URL...`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub urls: Vec<String>,
}

impl CliArgs {
    pub const USAGE: &'static str = "usage: product-image-resolver [--config PATH] URL...";

    /// Parse arguments, excluding the program name
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    let path = args.next().context("--config requires a path")?;
                    parsed.config_path = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => bail!("unknown option '{flag}'\n{}", Self::USAGE),
                _ => parsed.urls.push(arg),
            }
        }

        if parsed.urls.is_empty() {
            bail!("no product URLs given\n{}", Self::USAGE);
        }
        Ok(parsed)
    }
}

/// Load configuration, resolve every URL and print one JSON row per product
pub async fn run(args: CliArgs) -> Result<()> {
    let config = ConfigManager::new(args.config_path)
        .load_config()
        .context("Failed to load configuration")?;

    infrastructure::init_logging_with_config(&config.logging).context("Failed to initialize logging")?;

    let resolver = Arc::new(
        ImageResolver::with_config(config.resolver.clone()).context("Invalid resolver configuration")?,
    );
    let fetcher = HttpClient::new(config.http.clone())?;
    let service = ImageBatchService::new(fetcher, resolver, config.batch.clone());

    info!("Resolving images for {} products", args.urls.len());
    let report = service.run(&args.urls).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in &report.rows {
        serde_json::to_writer(&mut out, row)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(
        "Done: {} with images, {} without images, {} failed",
        report.succeeded, report.without_images, report.failed
    );
    Ok(())
}
