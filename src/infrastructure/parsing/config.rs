//! Resolver configuration
//!
//! Centralized rule tables for candidate extraction, canonicalization and
//! ranking. Every list is data: tune it here (or in the config file) instead of
//! touching the strategies.

use super::{ParsingError, ParsingResult};
use crate::domain::constants::{attributes, keywords, limits, query, scripts};
use serde::{Deserialize, Serialize};

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Main resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum number of URLs returned per page
    pub max_results: usize,

    /// Dimension segments with a side at or below this are thumbnails
    pub small_dimension_threshold: u32,

    /// Attribute tables
    pub attributes: AttributeTables,

    /// Keyword tables
    pub keywords: KeywordTables,

    /// Script / JSON mining tables
    pub scripts: ScriptTables,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_results: limits::DEFAULT_MAX_RESULTS,
            small_dimension_threshold: limits::DEFAULT_SMALL_DIMENSION_THRESHOLD,
            attributes: AttributeTables::default(),
            keywords: KeywordTables::default(),
            scripts: ScriptTables::default(),
        }
    }
}

/// Attribute names, consulted in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeTables {
    /// Explicit zoom / gallery attributes
    pub zoom: Vec<String>,

    /// Width/density annotated lists
    pub srcset: Vec<String>,

    /// `img` source fallbacks
    pub source: Vec<String>,

    /// Lazy-load attributes
    pub lazy: Vec<String>,

    /// Effective `img` source lookup order for keyword matching
    pub effective_source: Vec<String>,
}

impl Default for AttributeTables {
    fn default() -> Self {
        Self {
            zoom: owned(attributes::ZOOM_ATTRIBUTES),
            srcset: owned(attributes::SRCSET_ATTRIBUTES),
            source: owned(attributes::SOURCE_ATTRIBUTES),
            lazy: owned(attributes::LAZY_ATTRIBUTES),
            effective_source: owned(attributes::EFFECTIVE_SOURCE_ATTRIBUTES),
        }
    }
}

/// Keyword lists, matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    pub product_image: Vec<String>,
    pub product_priority: Vec<String>,
    pub already_maximal: Vec<String>,
    pub excluded: Vec<String>,
    pub thumbnail_tokens: Vec<String>,
    pub full_size_token: String,
    pub image_extensions: Vec<String>,
    pub size_query_substrings: Vec<String>,
    pub size_query_suffixes: Vec<String>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            product_image: owned(keywords::PRODUCT_IMAGE_KEYWORDS),
            product_priority: owned(keywords::PRODUCT_PRIORITY_MARKERS),
            already_maximal: owned(keywords::ALREADY_MAXIMAL_MARKERS),
            excluded: owned(keywords::EXCLUDED_KEYWORDS),
            thumbnail_tokens: owned(keywords::THUMBNAIL_TOKENS),
            full_size_token: keywords::FULL_SIZE_TOKEN.to_string(),
            image_extensions: owned(keywords::IMAGE_EXTENSIONS),
            size_query_substrings: owned(query::SIZE_KEY_SUBSTRINGS),
            size_query_suffixes: owned(query::SIZE_KEY_SUFFIXES),
        }
    }
}

/// Script and JSON tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptTables {
    pub json_image_key_hints: Vec<String>,
    pub vendor_state_keys: Vec<String>,
    pub vendor_zoom_field: String,
    pub vendor_product_field: String,
    pub vendor_image_groups: Vec<String>,
    pub array_keys: Vec<String>,
}

impl Default for ScriptTables {
    fn default() -> Self {
        Self {
            json_image_key_hints: owned(scripts::JSON_IMAGE_KEY_HINTS),
            vendor_state_keys: owned(scripts::VENDOR_STATE_KEYS),
            vendor_zoom_field: scripts::VENDOR_ZOOM_FIELD.to_string(),
            vendor_product_field: scripts::VENDOR_PRODUCT_FIELD.to_string(),
            vendor_image_groups: owned(scripts::VENDOR_IMAGE_GROUPS),
            array_keys: owned(scripts::SCRIPT_ARRAY_KEYS),
        }
    }
}

impl ResolverConfig {
    /// Validate the tables; keyword tables are lowercased so matching stays case-insensitive
    pub fn validate(&self) -> ParsingResult<()> {
        if self.max_results == 0 {
            return Err(ParsingError::configuration("max_results", "max_results must be greater than 0"));
        }

        if self.small_dimension_threshold == 0 {
            return Err(ParsingError::configuration(
                "small_dimension_threshold",
                "small_dimension_threshold must be greater than 0",
            ));
        }

        for (field, table) in [
            ("keywords.image_extensions", &self.keywords.image_extensions),
            ("keywords.excluded", &self.keywords.excluded),
            ("attributes.source", &self.attributes.source),
            ("scripts.json_image_key_hints", &self.scripts.json_image_key_hints),
        ] {
            if table.is_empty() {
                return Err(ParsingError::configuration(field, format!("{field} must not be empty")));
            }
            if table.iter().any(|entry| entry.trim().is_empty()) {
                return Err(ParsingError::configuration(field, format!("{field} contains a blank entry")));
            }
        }

        if self.keywords.full_size_token.trim().is_empty() {
            return Err(ParsingError::configuration(
                "keywords.full_size_token",
                "full_size_token must not be blank",
            ));
        }

        let token = self.keywords.full_size_token.to_lowercase();
        if self.keywords.thumbnail_tokens.iter().any(|t| t.to_lowercase() == token) {
            return Err(ParsingError::configuration(
                "keywords.full_size_token",
                "full_size_token must not itself be a thumbnail token",
            ));
        }
        if token.contains("thumb") || token.contains("_small") {
            return Err(ParsingError::configuration(
                "keywords.full_size_token",
                "full_size_token must not contain a thumbnail marker",
            ));
        }

        Ok(())
    }

    /// Copy with every case-insensitive table lowercased
    pub fn normalized(&self) -> Self {
        let lower = |values: &[String]| values.iter().map(|v| v.trim().to_lowercase()).collect();
        let mut config = self.clone();
        config.keywords.product_image = lower(&self.keywords.product_image);
        config.keywords.product_priority = lower(&self.keywords.product_priority);
        config.keywords.already_maximal = lower(&self.keywords.already_maximal);
        config.keywords.excluded = lower(&self.keywords.excluded);
        config.keywords.thumbnail_tokens = lower(&self.keywords.thumbnail_tokens);
        config.keywords.image_extensions = self
            .keywords
            .image_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .collect();
        config.keywords.size_query_substrings = lower(&self.keywords.size_query_substrings);
        config.keywords.size_query_suffixes = lower(&self.keywords.size_query_suffixes);
        config.scripts.json_image_key_hints = lower(&self.scripts.json_image_key_hints);
        config
    }

    /// Case-insensitive substring match against a keyword table (table must be lowercase)
    pub fn contains_any(value: &str, table: &[String]) -> bool {
        let lowered = value.to_lowercase();
        table.iter().any(|keyword| lowered.contains(keyword.as_str()))
    }
}
