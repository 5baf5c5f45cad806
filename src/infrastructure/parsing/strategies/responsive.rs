//! Responsive image sets (`srcset`) and `img` source fallbacks

use super::{CandidateStrategy, attribute_value, compile_selector, is_img};
use crate::domain::{Candidate, Strategy};
use crate::infrastructure::parsing::config::ResolverConfig;
use crate::infrastructure::parsing::ParsingResult;
use scraper::{Html, Selector};
use tracing::trace;

/// One `url descriptor` entry of a srcset list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcsetEntry<'a> {
    pub url: &'a str,
    /// Width in pixels, or density scaled by 1000; `None` when absent or unparsable
    pub score: Option<u64>,
}

/// Parse a comma separated srcset list
pub fn parse_srcset(srcset: &str) -> Vec<SrcsetEntry<'_>> {
    srcset
        .split(',')
        .filter_map(|chunk| {
            let mut bits = chunk.split_whitespace();
            let url = bits.next()?;
            let score = bits.next().and_then(descriptor_score);
            Some(SrcsetEntry { url, score })
        })
        .collect()
}

fn descriptor_score(descriptor: &str) -> Option<u64> {
    let descriptor = descriptor.trim().to_ascii_lowercase();
    if let Some(width) = descriptor.strip_suffix('w') {
        return width.parse::<u64>().ok();
    }
    if let Some(density) = descriptor.strip_suffix('x') {
        let density = density.parse::<f64>().ok()?;
        if !density.is_finite() || density < 0.0 {
            return None;
        }
        return Some((density * 1000.0).round() as u64);
    }
    None
}

/// Largest-descriptor entry, or every entry when none carries a descriptor
pub fn select_srcset_urls<'a>(entries: &[SrcsetEntry<'a>]) -> Vec<&'a str> {
    let mut best: Option<(u64, &'a str)> = None;
    for entry in entries {
        if let Some(score) = entry.score {
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, entry.url));
            }
        }
    }

    match best {
        Some((_, url)) => vec![url],
        None => entries.iter().map(|entry| entry.url).collect(),
    }
}

/// Picks the largest rendition of each srcset and falls back to `img` sources
pub struct ResponsiveImageStrategy {
    srcset_attributes: Vec<String>,
    source_attributes: Vec<String>,
    selector: Selector,
}

impl ResponsiveImageStrategy {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        Ok(Self {
            srcset_attributes: config.attributes.srcset.clone(),
            source_attributes: config.attributes.source.clone(),
            selector: compile_selector("picture > source, img")?,
        })
    }
}

impl CandidateStrategy for ResponsiveImageStrategy {
    fn name(&self) -> &'static str {
        "responsive-image-sets"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for element in document.select(&self.selector) {
            for attribute in &self.srcset_attributes {
                let Some(srcset) = attribute_value(&element, attribute) else {
                    continue;
                };
                let entries = parse_srcset(srcset);
                if entries.is_empty() {
                    trace!("Skipping empty {} list", attribute);
                    continue;
                }
                for url in select_srcset_urls(&entries) {
                    candidates.push(Candidate::unranked(url, Strategy::ResponsiveImageSet));
                }
            }

            if is_img(&element) {
                for attribute in &self.source_attributes {
                    if let Some(value) = attribute_value(&element, attribute) {
                        candidates.push(Candidate::unranked(value, Strategy::ResponsiveImageSet));
                    }
                }
            }
        }

        candidates
    }
}
