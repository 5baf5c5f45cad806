//! Lazy-load attributes

use super::{CandidateStrategy, attribute_selector, attribute_value, is_img};
use crate::domain::{Candidate, Strategy};
use crate::infrastructure::parsing::config::ResolverConfig;
use crate::infrastructure::parsing::ParsingResult;
use scraper::{Html, Selector};

/// Lazy sources on non-`img` elements, plus the lazy attributes of `img`
/// elements that the responsive pass does not already read
pub struct LazyAttributeStrategy {
    /// Every lazy attribute, for non-`img` elements
    element_attributes: Vec<String>,
    /// Lazy attributes minus the `img` source fallbacks
    img_attributes: Vec<String>,
    selector: Option<Selector>,
}

impl LazyAttributeStrategy {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        let element_attributes = config.attributes.lazy.clone();
        let img_attributes = element_attributes
            .iter()
            .filter(|attribute| !config.attributes.source.contains(*attribute))
            .cloned()
            .collect();
        let selector = attribute_selector("", &element_attributes)?;

        Ok(Self {
            element_attributes,
            img_attributes,
            selector,
        })
    }
}

impl CandidateStrategy for LazyAttributeStrategy {
    fn name(&self) -> &'static str {
        "lazy-attributes"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let Some(selector) = &self.selector else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for element in document.select(selector) {
            let attributes = if is_img(&element) {
                &self.img_attributes
            } else {
                &self.element_attributes
            };

            candidates.extend(
                attributes
                    .iter()
                    .filter_map(|attribute| attribute_value(&element, attribute))
                    .map(|value| Candidate::unranked(value, Strategy::LazyAttribute)),
            );
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(html: &str) -> Vec<String> {
        let strategy = LazyAttributeStrategy::new(&ResolverConfig::default()).unwrap();
        strategy
            .extract(&Html::parse_document(html))
            .into_iter()
            .map(|c| c.raw_url)
            .collect()
    }

    #[test]
    fn test_non_img_elements_expose_every_lazy_attribute() {
        let found = urls(r#"<div data-src="/a.jpg" data-lazy="/b.jpg"></div>"#);
        assert_eq!(found, vec!["/a.jpg", "/b.jpg"]);
    }

    #[test]
    fn test_img_skips_attributes_read_by_responsive_pass() {
        let found = urls(r#"<img src="/s.jpg" data-src="/d.jpg" data-lazy-src="/l.jpg">"#);
        assert_eq!(found, vec!["/l.jpg"]);
    }

    #[test]
    fn test_no_lazy_attributes() {
        assert!(urls(r#"<img src="/s.jpg"><div class="x"></div>"#).is_empty());
    }
}
