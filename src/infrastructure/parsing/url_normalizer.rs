//! URL normalization
//!
//! Turns raw candidate strings into absolute `http`/`https` URLs relative to the
//! page they were found on, and discards anything that does not point at a
//! recognized image file.

use super::config::ResolverConfig;
use super::context::ImageParseContext;
use super::{ParsingError, ParsingResult};
use regex::Regex;
use tracing::trace;
use url::Url;

/// Resolves raw candidate URLs against a page
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    /// `.ext` followed by end of path or a non-alphanumeric character
    extension_pattern: Regex,
}

impl UrlNormalizer {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        let alternatives = config
            .keywords
            .image_extensions
            .iter()
            .map(|ext| regex::escape(ext.trim().trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?i)\.(?:{alternatives})(?:$|[^a-z0-9])");
        let extension_pattern =
            Regex::new(&pattern).map_err(|e| ParsingError::invalid_pattern("image_extensions", e))?;

        Ok(Self { extension_pattern })
    }

    /// Resolve a raw string; `None` means the candidate is discarded
    pub fn normalize(&self, raw: &str, context: &ImageParseContext) -> Option<Url> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let resolved = match Self::resolve(raw, context) {
            Ok(url) => url,
            Err(e) => {
                trace!("Discarding candidate: {}", e);
                return None;
            }
        };

        if !matches!(resolved.scheme(), "http" | "https") || resolved.host_str().is_none() {
            trace!("Discarding non-web URL: {}", resolved);
            return None;
        }

        if !self.has_image_extension(&resolved) {
            trace!("Discarding URL without image extension: {}", resolved);
            return None;
        }

        Some(resolved)
    }

    /// Whether the URL path names a recognized image file
    pub fn has_image_extension(&self, url: &Url) -> bool {
        self.extension_pattern.is_match(url.path())
    }

    fn resolve(raw: &str, context: &ImageParseContext) -> ParsingResult<Url> {
        let base = context.page_url.as_str();
        let failed = |e: url::ParseError| ParsingError::url_resolution_failed(raw, e, Some(base));

        if raw.starts_with("//") {
            return Url::parse(&format!("{}:{}", context.scheme(), raw)).map_err(failed);
        }

        if raw.starts_with('/') {
            return context.origin.join(raw).map_err(failed);
        }

        match Url::parse(raw) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => context.page_url.join(raw).map_err(failed),
            Err(e) => Err(failed(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn normalizer() -> UrlNormalizer {
        UrlNormalizer::new(&ResolverConfig::default()).unwrap()
    }

    fn context() -> ImageParseContext {
        ImageParseContext::parse("https://shop.example/catalog/item/42?ref=home").unwrap()
    }

    #[rstest]
    #[case("//cdn.example/a.jpg", "https://cdn.example/a.jpg")]
    #[case("/img/a.png", "https://shop.example/img/a.png")]
    #[case("b.webp", "https://shop.example/catalog/item/b.webp")]
    #[case("../c.gif", "https://shop.example/catalog/c.gif")]
    #[case("http://other.example/d.JPEG", "http://other.example/d.JPEG")]
    #[case("  /img/padded.jpg  ", "https://shop.example/img/padded.jpg")]
    #[case("/img/a.jpg?w=100", "https://shop.example/img/a.jpg?w=100")]
    fn test_resolves_relative_forms(#[case] raw: &str, #[case] expected: &str) {
        let url = normalizer().normalize(raw, &context()).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("data:image/png;base64,iVBORw0KGgo=")]
    #[case("javascript:void(0)")]
    #[case("mailto:a@b.example")]
    #[case("ftp://files.example/a.jpg")]
    #[case("/img/photo")]
    #[case("/page.html")]
    #[case("/img/a.jpgx")]
    fn test_discards(#[case] raw: &str) {
        assert!(normalizer().normalize(raw, &context()).is_none());
    }

    #[test]
    fn test_extension_is_case_insensitive_and_may_precede_suffix() {
        let n = normalizer();
        assert!(n.normalize("/img/A.PNG", &context()).is_some());
        assert!(n.normalize("/img/a.jpg;v=2", &context()).is_some());
        assert!(n.normalize("/img/a.jpg/resize", &context()).is_some());
    }
}
