//! Explicit zoom / gallery attributes

use super::{CandidateStrategy, attribute_selector, attribute_value};
use crate::domain::{Candidate, PriorityClass, Strategy};
use crate::infrastructure::parsing::config::ResolverConfig;
use crate::infrastructure::parsing::ParsingResult;
use scraper::{Html, Selector};

/// Reads full-size URLs from `data-zoom-url`, `data-large-url` and friends
pub struct ZoomAttributeStrategy {
    attributes: Vec<String>,
    selector: Option<Selector>,
}

impl ZoomAttributeStrategy {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        let attributes = config.attributes.zoom.clone();
        let selector = attribute_selector("", &attributes)?;
        Ok(Self { attributes, selector })
    }
}

impl CandidateStrategy for ZoomAttributeStrategy {
    fn name(&self) -> &'static str {
        "zoom-attributes"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let Some(selector) = &self.selector else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for element in document.select(selector) {
            for attribute in &self.attributes {
                if let Some(value) = attribute_value(&element, attribute) {
                    candidates.push(Candidate::new(value, Strategy::ZoomAttribute, PriorityClass::Zoom));
                }
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_read_in_table_order_per_element() {
        let strategy = ZoomAttributeStrategy::new(&ResolverConfig::default()).unwrap();
        let html = Html::parse_document(
            r#"<div data-image="/b.jpg" data-zoom-url="/a.jpg"></div>
               <a data-href="/c.jpg" data-lightbox=" "></a>"#,
        );

        let found: Vec<_> = strategy.extract(&html).into_iter().map(|c| c.raw_url).collect();
        assert_eq!(found, vec!["/a.jpg", "/b.jpg", "/c.jpg"]);
    }

    #[test]
    fn test_zoom_attribute_candidates_carry_zoom_priority() {
        let strategy = ZoomAttributeStrategy::new(&ResolverConfig::default()).unwrap();
        let html = Html::parse_document(r#"<img data-zoom="/z.jpg">"#);
        let candidates = strategy.extract(&html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].priority, PriorityClass::Zoom);
        assert_eq!(candidates[0].strategy, Strategy::ZoomAttribute);
    }
}
