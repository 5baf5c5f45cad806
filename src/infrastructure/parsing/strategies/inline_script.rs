//! Inline script pattern mining
//!
//! Script bodies that are not JSON documents are searched for image array
//! literals (`images: [...]`, `"productMedia" = [...]`) and for embedded
//! `JSON.parse("...")` payloads.

use super::json_walk::{self, ValueFilter};
use super::{CandidateStrategy, compile_selector, script_body};
use crate::domain::{Candidate, Strategy};
use crate::infrastructure::parsing::config::ResolverConfig;
use crate::infrastructure::parsing::{ParsingError, ParsingResult};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::trace;

pub struct InlineScriptStrategy {
    key_hints: Vec<String>,
    selector: Selector,

    /// `key: [ ... ]` / `"key" = [ ... ]`, capturing the array body
    array_pattern: Option<Regex>,
    /// Quoted absolute or root-relative image URL inside an array body
    quoted_url_pattern: Regex,
    /// `JSON.parse("...")`
    json_parse_double: Regex,
    /// `JSON.parse('...')`
    json_parse_single: Regex,
}

impl InlineScriptStrategy {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        let normalized = config.normalized();
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| ParsingError::invalid_pattern(name, e))
        };

        let array_pattern = if config.scripts.array_keys.is_empty() {
            None
        } else {
            let keys = config
                .scripts
                .array_keys
                .iter()
                .map(|key| regex::escape(key.trim()))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile("array_keys", &format!(r#"(?is)(?:{keys})["']?\s*[:=]\s*\[(.*?)\]"#))?)
        };

        let extensions = normalized
            .keywords
            .image_extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            key_hints: normalized.scripts.json_image_key_hints,
            selector: compile_selector("script")?,
            array_pattern,
            quoted_url_pattern: compile(
                "quoted_url",
                &format!(r#"(?i)["'](https?://[^"']+|/[^"']+\.(?:{extensions}))["']"#),
            )?,
            json_parse_double: compile("json_parse_double", r#"(?s)JSON\.parse\(\s*"((?:[^"\\]|\\.)*)"\s*\)"#)?,
            json_parse_single: compile("json_parse_single", r#"(?s)JSON\.parse\(\s*'((?:[^'\\]|\\.)*)'\s*\)"#)?,
        })
    }

    /// Candidates for one non-JSON script body
    pub fn extract_from_script(&self, body: &str) -> Vec<Candidate> {
        let mut candidates = self.array_literal_urls(body);
        candidates.extend(self.embedded_json_urls(body));
        candidates
    }

    fn array_literal_urls(&self, body: &str) -> Vec<Candidate> {
        let Some(array_pattern) = &self.array_pattern else {
            return Vec::new();
        };

        array_pattern
            .captures_iter(body)
            .filter_map(|captures| captures.get(1))
            .flat_map(|array| {
                self.quoted_url_pattern
                    .captures_iter(array.as_str())
                    .filter_map(|captures| captures.get(1))
                    .map(|url| Candidate::unranked(url.as_str(), Strategy::ScriptArray))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn embedded_json_urls(&self, body: &str) -> Vec<Candidate> {
        let mut literals: Vec<(usize, &str)> = Vec::new();
        for pattern in [&self.json_parse_double, &self.json_parse_single] {
            literals.extend(
                pattern
                    .captures_iter(body)
                    .filter_map(|captures| captures.get(1))
                    .map(|literal| (literal.start(), literal.as_str())),
            );
        }
        literals.sort_by_key(|(start, _)| *start);

        let mut candidates = Vec::new();
        for (_, literal) in literals {
            let decoded = unescape_js_literal(literal);
            match serde_json::from_str::<Value>(&decoded) {
                Ok(data) => candidates.extend(
                    json_walk::collect_image_values(&data, &self.key_hints, ValueFilter::AllowRootRelative)
                        .into_iter()
                        .map(|url| Candidate::unranked(url, Strategy::EmbeddedJson)),
                ),
                Err(e) => trace!("{}", ParsingError::malformed_script_data("JSON.parse literal", e)),
            }
        }
        candidates
    }
}

/// Decode a JavaScript string literal body
///
/// Tries a JSON string decode first, then falls back to unescaping quotes only.
pub fn unescape_js_literal(literal: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{literal}\""))
        .unwrap_or_else(|_| literal.replace("\\\"", "\"").replace("\\'", "'"))
}

impl CandidateStrategy for InlineScriptStrategy {
    fn name(&self) -> &'static str {
        "inline-scripts"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for script in document.select(&self.selector) {
            let body = script_body(&script);
            let trimmed = body.trim();
            if trimmed.is_empty() || serde_json::from_str::<Value>(trimmed).is_ok() {
                continue;
            }
            candidates.extend(self.extract_from_script(trimmed));
        }

        candidates
    }
}
