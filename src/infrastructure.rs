//! Infrastructure layer for parsing, fetching, configuration and logging

pub mod config; // Layered configuration loading
pub mod http_client;
pub mod logging; // Logging infrastructure
pub mod parsing; // Image resolution engine

// Re-export commonly used items
pub use config::{AppConfig, BatchConfig, ConfigError, ConfigManager, LoggingConfig};
pub use http_client::{FetchError, FetchedPage, HttpClient, HttpClientConfig, PageFetcher};
pub use logging::{init_logging, init_logging_with_config};
pub use parsing::{ImageResolver, ParsingError, ParsingResult, ResolverConfig};
