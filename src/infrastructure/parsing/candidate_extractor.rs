//! Candidate extraction
//!
//! Runs every strategy over a document in fixed order and concatenates their
//! output. Duplicates across strategies are expected and resolved downstream.

use super::config::ResolverConfig;
use super::strategies::{
    CandidateStrategy, InlineScriptStrategy, KeywordImageStrategy, LazyAttributeStrategy,
    ResponsiveImageStrategy, StructuredJsonStrategy, ZoomAttributeStrategy,
};
use super::ParsingResult;
use crate::domain::Candidate;
use scraper::Html;
use tracing::debug;

pub struct CandidateExtractor {
    strategies: Vec<Box<dyn CandidateStrategy>>,
}

impl CandidateExtractor {
    /// Build the default strategy chain
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        let strategies: Vec<Box<dyn CandidateStrategy>> = vec![
            Box::new(ZoomAttributeStrategy::new(config)?),
            Box::new(ResponsiveImageStrategy::new(config)?),
            Box::new(LazyAttributeStrategy::new(config)?),
            Box::new(KeywordImageStrategy::new(config)?),
            Box::new(StructuredJsonStrategy::new(config)?),
            Box::new(InlineScriptStrategy::new(config)?),
        ];
        Ok(Self { strategies })
    }

    /// Build from an explicit strategy chain
    pub fn with_strategies(strategies: Vec<Box<dyn CandidateStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategy labels in run order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    pub fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for strategy in &self.strategies {
            let found = strategy.extract(document);
            debug!("{}: {} candidates", strategy.name(), found.len());
            candidates.extend(found);
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Strategy;

    struct Fixed(&'static str);

    impl CandidateStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn extract(&self, _document: &Html) -> Vec<Candidate> {
            vec![Candidate::unranked(format!("/{}.jpg", self.0), Strategy::LazyAttribute)]
        }
    }

    #[test]
    fn test_default_chain_order() {
        let extractor = CandidateExtractor::new(&ResolverConfig::default()).unwrap();
        assert_eq!(
            extractor.strategy_names(),
            vec![
                "zoom-attributes",
                "responsive-image-sets",
                "lazy-attributes",
                "keyword-images",
                "structured-json",
                "inline-scripts",
            ]
        );
    }

    #[test]
    fn test_outputs_are_concatenated_in_chain_order() {
        let extractor = CandidateExtractor::with_strategies(vec![Box::new(Fixed("b")), Box::new(Fixed("a"))]);
        let found: Vec<_> = extractor
            .extract(&Html::parse_document("<p></p>"))
            .into_iter()
            .map(|c| c.raw_url)
            .collect();
        assert_eq!(found, vec!["/b.jpg", "/a.jpg"]);
    }

    #[test]
    fn test_every_strategy_contributes() {
        let extractor = CandidateExtractor::new(&ResolverConfig::default()).unwrap();
        let html = Html::parse_document(
            r#"<div data-zoom-url="/z.jpg"></div>
               <img src="/product/main.jpg" data-lazy="/l.jpg">
               <script type="application/json">{"image": "https://cdn.example/j.jpg"}</script>
               <script>var images = ['/s.jpg'];</script>"#,
        );
        let strategies: Vec<_> = extractor.extract(&html).into_iter().map(|c| c.strategy).collect();
        for expected in [
            Strategy::ZoomAttribute,
            Strategy::ResponsiveImageSet,
            Strategy::LazyAttribute,
            Strategy::KeywordImage,
            Strategy::StructuredJson,
            Strategy::ScriptArray,
        ] {
            assert!(strategies.contains(&expected), "missing {expected}");
        }
    }
}
