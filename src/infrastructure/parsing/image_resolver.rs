//! Product image resolver
//!
//! Extract -> normalize -> canonicalize -> filter/rank. The resolver holds only
//! compiled selectors, patterns and rule tables, so one instance can be shared
//! across threads and reused for any number of pages.

use super::candidate_extractor::CandidateExtractor;
use super::config::ResolverConfig;
use super::context::ImageParseContext;
use super::image_ranker::{ImageRanker, ResolvedImage};
use super::size_canonicalizer::SizeCanonicalizer;
use super::url_normalizer::UrlNormalizer;
use super::ParsingResult;
use scraper::Html;
use tracing::debug;
use url::Url;

pub struct ImageResolver {
    config: ResolverConfig,
    extractor: CandidateExtractor,
    normalizer: UrlNormalizer,
    canonicalizer: SizeCanonicalizer,
    ranker: ImageRanker,
}

impl ImageResolver {
    /// Create a resolver with default rule tables
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(ResolverConfig::default())
    }

    /// Create a resolver with custom rule tables
    pub fn with_config(config: ResolverConfig) -> ParsingResult<Self> {
        config.validate()?;

        Ok(Self {
            extractor: CandidateExtractor::new(&config)?,
            normalizer: UrlNormalizer::new(&config)?,
            canonicalizer: SizeCanonicalizer::new(&config)?,
            ranker: ImageRanker::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the ordered, deduplicated full-size image URLs of a parsed page
    pub fn resolve(&self, document: &Html, page_url: &Url) -> Vec<String> {
        let context = ImageParseContext::new(page_url.clone());
        self.resolve_with_context(document, &context)
    }

    /// Parse raw HTML and resolve it; only an invalid page URL is an error
    pub fn resolve_html(&self, html: &str, page_url: &str) -> ParsingResult<Vec<String>> {
        let context = ImageParseContext::parse(page_url)?;
        let document = Html::parse_document(html);
        Ok(self.resolve_with_context(&document, &context))
    }

    pub fn resolve_with_context(&self, document: &Html, context: &ImageParseContext) -> Vec<String> {
        let candidates = self.extractor.extract(document);
        let total = candidates.len();

        let resolved: Vec<ResolvedImage> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let normalized = self.normalizer.normalize(&candidate.raw_url, context)?;
                let already_maximal =
                    candidate.strategy.is_already_maximal() || self.ranker.is_already_maximal(&normalized);

                let canonical = if already_maximal {
                    normalized.clone()
                } else {
                    self.canonicalizer.canonicalize(&normalized)
                };
                let priority = candidate.priority.promote(self.ranker.url_class(&normalized));

                Some(ResolvedImage {
                    normalized,
                    canonical,
                    priority,
                })
            })
            .collect();

        let ranked = self.ranker.rank(resolved);
        debug!(
            "Resolved {} images from {} candidates on {}",
            ranked.len(),
            total,
            context.page_url
        );
        ranked
    }
}
