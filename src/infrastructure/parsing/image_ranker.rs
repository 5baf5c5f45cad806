//! Filtering and ranking of resolved image URLs

use super::config::ResolverConfig;
use crate::domain::PriorityClass;
use std::collections::HashSet;
use tracing::trace;
use url::Url;

/// A candidate after normalization and canonicalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Absolute URL before size rewriting
    pub normalized: Url,
    /// Final URL
    pub canonical: Url,
    /// Strategy hint, already merged with the URL class
    pub priority: PriorityClass,
}

impl ResolvedImage {
    /// Deduplication identity: the case-folded path
    pub fn identity(&self) -> String {
        self.canonical.path().to_lowercase()
    }
}

/// Keyword classification, exclusion, ordering, deduplication and truncation
#[derive(Debug, Clone)]
pub struct ImageRanker {
    max_results: usize,
    excluded: Vec<String>,
    already_maximal: Vec<String>,
    product_markers: Vec<String>,
}

impl ImageRanker {
    pub fn new(config: &ResolverConfig) -> Self {
        let config = config.normalized();
        Self {
            max_results: config.max_results,
            excluded: config.keywords.excluded,
            already_maximal: config.keywords.already_maximal,
            product_markers: config.keywords.product_priority,
        }
    }

    /// Whether the URL already names the largest rendition
    pub fn is_already_maximal(&self, url: &Url) -> bool {
        ResolverConfig::contains_any(url.as_str(), &self.already_maximal)
    }

    /// Class implied by the URL text alone
    pub fn url_class(&self, url: &Url) -> PriorityClass {
        if self.is_already_maximal(url) {
            PriorityClass::Zoom
        } else if ResolverConfig::contains_any(url.as_str(), &self.product_markers) {
            PriorityClass::Product
        } else {
            PriorityClass::Default
        }
    }

    pub fn is_excluded(&self, url: &Url) -> bool {
        ResolverConfig::contains_any(url.as_str(), &self.excluded)
    }

    /// Produce the final ordered list of URL strings
    pub fn rank(&self, images: Vec<ResolvedImage>) -> Vec<String> {
        let mut kept: Vec<ResolvedImage> = images
            .into_iter()
            .filter(|image| {
                let excluded = self.is_excluded(&image.normalized) || self.is_excluded(&image.canonical);
                if excluded {
                    trace!("Excluded {}", image.canonical);
                }
                !excluded
            })
            .collect();

        // stable: discovery order is the tiebreak within a class
        kept.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut seen = HashSet::new();
        kept.into_iter()
            .filter(|image| seen.insert(image.identity()))
            .take(self.max_results)
            .map(|image| image.canonical.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, priority: PriorityClass) -> ResolvedImage {
        let url = Url::parse(url).unwrap();
        ResolvedImage {
            normalized: url.clone(),
            canonical: url,
            priority,
        }
    }

    fn ranker() -> ImageRanker {
        ImageRanker::new(&ResolverConfig::default())
    }

    #[test]
    fn test_url_class() {
        let r = ranker();
        let class = |s: &str| r.url_class(&Url::parse(s).unwrap());
        assert_eq!(class("https://x.example/videoluxZoom/a.jpg"), PriorityClass::Zoom);
        assert_eq!(class("https://x.example/img/product-zoom-1.jpg"), PriorityClass::Zoom);
        assert_eq!(class("https://x.example/p/123.jpg"), PriorityClass::Product);
        assert_eq!(class("https://x.example/Gallery/1.jpg"), PriorityClass::Product);
        assert_eq!(class("https://x.example/img/1.jpg"), PriorityClass::Default);
    }

    #[test]
    fn test_rank_orders_by_class_stably() {
        let ranked = ranker().rank(vec![
            image("https://x.example/1.jpg", PriorityClass::Default),
            image("https://x.example/2.jpg", PriorityClass::Zoom),
            image("https://x.example/3.jpg", PriorityClass::Product),
            image("https://x.example/4.jpg", PriorityClass::Zoom),
        ]);
        assert_eq!(
            ranked,
            vec![
                "https://x.example/2.jpg",
                "https://x.example/4.jpg",
                "https://x.example/3.jpg",
                "https://x.example/1.jpg",
            ]
        );
    }

    #[test]
    fn test_rank_dedups_by_case_folded_path_after_ordering() {
        let ranked = ranker().rank(vec![
            image("https://a.example/IMG/1.jpg?v=1", PriorityClass::Default),
            image("http://b.example/img/1.jpg", PriorityClass::Zoom),
        ]);
        assert_eq!(ranked, vec!["http://b.example/img/1.jpg"]);
    }

    #[test]
    fn test_exclusion_checks_both_forms() {
        let mut pre_logo = image("https://x.example/logo/a.jpg", PriorityClass::Zoom);
        pre_logo.canonical = Url::parse("https://x.example/a.jpg").unwrap();
        let ranked = ranker().rank(vec![
            pre_logo,
            image("https://x.example/Site-Icon.png", PriorityClass::Default),
            image("https://x.example/ok.jpg", PriorityClass::Default),
        ]);
        assert_eq!(ranked, vec!["https://x.example/ok.jpg"]);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let config = ResolverConfig {
            max_results: 2,
            ..ResolverConfig::default()
        };
        let images = (0..5)
            .map(|i| image(&format!("https://x.example/{i}.jpg"), PriorityClass::Default))
            .collect();
        assert_eq!(ImageRanker::new(&config).rank(images).len(), 2);
    }
}
