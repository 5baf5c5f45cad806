//! Batch image resolution over a list of product pages
//!
//! Fetch -> resolve -> slot assignment, one page at a time with a fixed delay
//! between requests. A failing page never stops the batch.

use crate::domain::{ProductImageRow, ProductImageSlots};
use crate::infrastructure::config::BatchConfig;
use crate::infrastructure::http_client::{FetchedPage, PageFetcher};
use crate::infrastructure::parsing::{ImageResolver, ParsingResult};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// One row per product, in input order
    pub rows: Vec<ProductImageRow>,
    /// Pages that produced at least one image
    pub succeeded: usize,
    /// Pages fetched and parsed without any image
    pub without_images: usize,
    /// Pages that could not be fetched or resolved
    pub failed: usize,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.succeeded + self.without_images + self.failed
    }
}

/// Per-page result before it is folded into the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Resolved(Vec<String>),
    Empty,
    Failed(String),
}

pub struct ImageBatchService<F: PageFetcher> {
    fetcher: F,
    resolver: Arc<ImageResolver>,
    config: BatchConfig,
}

impl<F: PageFetcher> ImageBatchService<F> {
    pub fn new(fetcher: F, resolver: Arc<ImageResolver>, config: BatchConfig) -> Self {
        Self {
            fetcher,
            resolver,
            config,
        }
    }

    /// Resolve a fetched page; the document never outlives this call
    fn resolve_page(&self, page: &FetchedPage) -> ParsingResult<Vec<String>> {
        self.resolver.resolve_html(&page.body, &page.url)
    }

    /// Fetch and resolve a single product page
    pub async fn process_url(&self, url: &str) -> PageOutcome {
        let page = match self.fetcher.fetch_page(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return PageOutcome::Failed(e.to_string());
            }
        };

        match self.resolve_page(&page) {
            Ok(images) if images.is_empty() => {
                info!("No images found: {}", url);
                PageOutcome::Empty
            }
            Ok(images) => {
                info!("Found {} images: {}", images.len(), url);
                PageOutcome::Resolved(images)
            }
            Err(e) => {
                warn!("Failed to resolve images for {}: {}", url, e);
                PageOutcome::Failed(e.to_string())
            }
        }
    }

    /// Process every URL in order, sleeping between requests
    pub async fn run(&self, urls: &[String]) -> BatchReport {
        let mut report = BatchReport::default();
        let delay = Duration::from_millis(self.config.request_delay_ms);

        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            info!("[{}/{}] {}", index + 1, urls.len(), url);
            let slots = match self.process_url(url).await {
                PageOutcome::Resolved(images) => {
                    report.succeeded += 1;
                    ProductImageSlots::from_images(&images, self.config.gallery_slots)
                }
                PageOutcome::Empty => {
                    report.without_images += 1;
                    ProductImageSlots::default()
                }
                PageOutcome::Failed(_) => {
                    report.failed += 1;
                    ProductImageSlots::default()
                }
            };
            report.rows.push(ProductImageRow::new(url.clone(), slots));
        }

        if self.config.drop_rows_without_gallery {
            let before = report.rows.len();
            report.rows.retain(|row| row.slots.has_gallery());
            debug!("Dropped {} rows without gallery images", before - report.rows.len());
        }

        info!(
            "Batch complete: {} succeeded, {} without images, {} failed",
            report.succeeded, report.without_images, report.failed
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory fetcher keyed by URL
    struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    impl StaticFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| ((*url).to_string(), (*body).to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
            self.pages
                .get(url)
                .map(|body| FetchedPage {
                    url: url.to_string(),
                    body: body.clone(),
                })
                .ok_or_else(|| FetchError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn service(fetcher: StaticFetcher, drop_rows_without_gallery: bool) -> ImageBatchService<StaticFetcher> {
        service_with_slots(fetcher, 2, drop_rows_without_gallery)
    }

    fn service_with_slots(
        fetcher: StaticFetcher,
        gallery_slots: usize,
        drop_rows_without_gallery: bool,
    ) -> ImageBatchService<StaticFetcher> {
        let config = BatchConfig {
            request_delay_ms: 0,
            gallery_slots,
            drop_rows_without_gallery,
        };
        ImageBatchService::new(fetcher, Arc::new(ImageResolver::new().unwrap()), config)
    }

    const GALLERY_PAGE: &str = r#"
        <img src="/img/1.jpg"><img src="/img/2.jpg"><img src="/img/3.jpg"><img src="/img/4.jpg">"#;

    #[tokio::test]
    async fn test_batch_counts_and_slots() {
        let fetcher = StaticFetcher::new(&[
            ("https://shop.example/a", GALLERY_PAGE),
            ("https://shop.example/b", "<p>nothing here</p>"),
        ]);
        let urls = vec![
            "https://shop.example/a".to_string(),
            "https://shop.example/b".to_string(),
            "https://shop.example/missing".to_string(),
        ];

        let report = service(fetcher, false).run(&urls).await;
        assert_eq!((report.succeeded, report.without_images, report.failed), (1, 1, 1));
        assert_eq!(report.processed(), 3);
        assert_eq!(report.rows.len(), 3);

        let first = &report.rows[0].slots;
        assert_eq!(first.main_image.as_deref(), Some("https://shop.example/img/1.jpg"));
        assert_eq!(first.gallery, vec!["https://shop.example/img/2.jpg", "https://shop.example/img/3.jpg"]);
        assert_eq!(first.overflow.as_deref(), Some("https://shop.example/img/4.jpg"));
        assert!(report.rows[2].slots.is_empty());
    }

    #[tokio::test]
    async fn test_rows_without_gallery_can_be_dropped() {
        let fetcher = StaticFetcher::new(&[
            ("https://shop.example/a", GALLERY_PAGE),
            ("https://shop.example/single", r#"<img src="/img/only.jpg">"#),
        ]);
        let urls = vec!["https://shop.example/a".to_string(), "https://shop.example/single".to_string()];

        let report = service(fetcher, true).run(&urls).await;
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].product_url, "https://shop.example/a");
    }

    #[tokio::test]
    async fn test_overflow_only_rows_survive_gallery_cleanup() {
        let fetcher = StaticFetcher::new(&[
            ("https://shop.example/a", GALLERY_PAGE),
            ("https://shop.example/single", r#"<img src="/img/only.jpg">"#),
        ]);
        let urls = vec!["https://shop.example/a".to_string(), "https://shop.example/single".to_string()];

        let report = service_with_slots(fetcher, 0, true).run(&urls).await;
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].product_url, "https://shop.example/a");
        assert!(report.rows[0].slots.gallery.is_empty());
        assert!(report.rows[0].slots.overflow.is_some());
    }

    #[tokio::test]
    async fn test_process_url_reports_fetch_failure() {
        let outcome = service(StaticFetcher::new(&[]), false).process_url("https://shop.example/x").await;
        assert!(matches!(outcome, PageOutcome::Failed(ref reason) if reason.contains("404")));
    }
}
