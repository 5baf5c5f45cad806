//! Keyword-filtered generic images

use super::{CandidateStrategy, attribute_value, compile_selector};
use crate::domain::{Candidate, PriorityClass, Strategy};
use crate::infrastructure::parsing::config::ResolverConfig;
use crate::infrastructure::parsing::ParsingResult;
use scraper::{Html, Selector};

/// `img` elements whose effective source mentions a product keyword
pub struct KeywordImageStrategy {
    source_attributes: Vec<String>,
    keywords: Vec<String>,
    selector: Selector,
}

impl KeywordImageStrategy {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        Ok(Self {
            source_attributes: config.attributes.effective_source.clone(),
            keywords: config.normalized().keywords.product_image,
            selector: compile_selector("img")?,
        })
    }
}

impl CandidateStrategy for KeywordImageStrategy {
    fn name(&self) -> &'static str {
        "keyword-images"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        document
            .select(&self.selector)
            .filter_map(|img| {
                self.source_attributes
                    .iter()
                    .find_map(|attribute| attribute_value(&img, attribute))
            })
            .filter(|source| ResolverConfig::contains_any(source, &self.keywords))
            .map(|source| Candidate::new(source, Strategy::KeywordImage, PriorityClass::Product))
            .collect()
    }
}
