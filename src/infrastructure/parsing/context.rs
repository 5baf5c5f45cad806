//! Parsing context for image resolution
//!
//! Holds the page URL a document was fetched from and the pieces of it the
//! normalizer needs on every candidate.

use super::{ParsingError, ParsingResult};
use url::Url;

/// Context information for one resolution pass
#[derive(Debug, Clone)]
pub struct ImageParseContext {
    /// Page the document was fetched from
    pub page_url: Url,

    /// `scheme://host[:port]` of the page
    pub origin: Url,
}

impl ImageParseContext {
    /// Create context from an absolute page URL
    pub fn new(page_url: Url) -> Self {
        let mut origin = page_url.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);

        Self { page_url, origin }
    }

    /// Parse and validate a page URL string
    pub fn parse(page_url: &str) -> ParsingResult<Self> {
        let url = Url::parse(page_url.trim()).map_err(|e| ParsingError::invalid_base_url(page_url, e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ParsingError::invalid_base_url(
                page_url,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if url.host_str().is_none() {
            return Err(ParsingError::invalid_base_url(page_url, "missing host"));
        }

        Ok(Self::new(url))
    }

    /// Scheme inherited by protocol-relative references
    pub fn scheme(&self) -> &str {
        self.page_url.scheme()
    }
}
