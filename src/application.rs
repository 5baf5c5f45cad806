//! Application layer module
//!
//! Use cases that drive the resolution engine over batches of product pages.

pub mod image_batch_service;

pub use image_batch_service::{BatchReport, ImageBatchService, PageOutcome};
