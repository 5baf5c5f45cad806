//! Structured JSON extraction from script bodies
//!
//! Scripts whose whole body is JSON are first read through the known vendor
//! state schema; when that yields nothing the tree is walked with the generic
//! image-key heuristic.

use super::json_walk::{self, ValueFilter};
use super::{CandidateStrategy, compile_selector, script_body};
use crate::domain::{Candidate, PriorityClass, Strategy};
use crate::infrastructure::parsing::config::ResolverConfig;
use crate::infrastructure::parsing::ParsingResult;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::trace;

/// Vendor state path from the state key down to the entity map
const VENDOR_ENTITY_PATH: &[&str] = &["product", "details", "entities"];

/// Path from an entity to its image groups
const VENDOR_IMAGE_PATH: &[&str] = &["variants", "value", "images"];

pub struct StructuredJsonStrategy {
    state_keys: Vec<String>,
    image_groups: Vec<String>,
    zoom_field: String,
    product_field: String,
    key_hints: Vec<String>,
    selector: Selector,
}

impl StructuredJsonStrategy {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        let scripts = &config.scripts;
        Ok(Self {
            state_keys: scripts.vendor_state_keys.clone(),
            image_groups: scripts.vendor_image_groups.clone(),
            zoom_field: scripts.vendor_zoom_field.clone(),
            product_field: scripts.vendor_product_field.clone(),
            key_hints: config.normalized().scripts.json_image_key_hints,
            selector: compile_selector("script")?,
        })
    }

    /// Candidates for one parsed JSON document
    pub fn extract_from_value(&self, data: &Value) -> Vec<Candidate> {
        let vendor = self.vendor_images(data);
        if !vendor.is_empty() {
            return vendor
                .into_iter()
                .map(|url| Candidate::new(url, Strategy::VendorJson, PriorityClass::Zoom))
                .collect();
        }

        json_walk::collect_image_values(data, &self.key_hints, ValueFilter::AbsoluteOnly)
            .into_iter()
            .map(|url| Candidate::unranked(url, Strategy::StructuredJson))
            .collect()
    }

    /// `<state>.product.details.entities[*].variants.value.images.{PRIMARY,GALLERY}`
    fn vendor_images(&self, data: &Value) -> Vec<String> {
        let mut images = Vec::new();

        for state_key in &self.state_keys {
            let Some(entities) = data
                .get(state_key.as_str())
                .and_then(|state| json_walk::lookup(state, VENDOR_ENTITY_PATH))
            else {
                continue;
            };

            for entity in json_walk::members(entities) {
                let Some(groups) = json_walk::lookup(entity, VENDOR_IMAGE_PATH) else {
                    continue;
                };
                for group in &self.image_groups {
                    let Some(entries) = groups.get(group.as_str()) else {
                        continue;
                    };
                    images.extend(
                        Self::group_entries(entries)
                            .into_iter()
                            .filter_map(|entry| self.rendition_url(entry)),
                    );
                }
            }
        }

        images
    }

    /// A group is either a single image entry or a list of them
    fn group_entries(group: &Value) -> Vec<&Value> {
        match group {
            Value::Array(items) => items.iter().collect(),
            Value::Object(_) => vec![group],
            _ => Vec::new(),
        }
    }

    /// Zoom rendition first, product rendition as fallback
    fn rendition_url(&self, entry: &Value) -> Option<String> {
        [&self.zoom_field, &self.product_field]
            .into_iter()
            .find_map(|field| {
                entry
                    .get(field.as_str())
                    .and_then(|rendition| rendition.get("url"))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
            })
            .map(str::to_string)
    }
}

impl CandidateStrategy for StructuredJsonStrategy {
    fn name(&self) -> &'static str {
        "structured-json"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (index, script) in document.select(&self.selector).enumerate() {
            let body = script_body(&script);
            let body = body.trim();
            if body.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(body) {
                Ok(data) => candidates.extend(self.extract_from_value(&data)),
                Err(e) => trace!("script#{} is not JSON: {}", index, e),
            }
        }

        candidates
    }
}
