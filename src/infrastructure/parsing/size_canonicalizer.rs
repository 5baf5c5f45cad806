//! Size canonicalization
//!
//! Ordered rewrite rules that turn thumbnail and responsive renditions into
//! the full-size URL. Every rule is idempotent and leaves non-matching URLs
//! untouched.

use super::config::ResolverConfig;
use super::{ParsingError, ParsingResult};
use regex::{NoExpand, Regex};
use std::fmt;
use tracing::trace;
use url::Url;

/// Path token delimiters for thumbnail token replacement
const TOKEN_DELIMITERS: [char; 4] = ['/', '_', '-', '.'];

fn is_token_delimiter(ch: char) -> bool {
    TOKEN_DELIMITERS.contains(&ch)
}

/// One rewrite rule, listed in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalRule {
    /// Drop `/<W>x<H>/` path segments with a small side
    DropSmallDimensionSegments,
    /// `thumb`, `small` ... path tokens become the full-size token
    ReplaceThumbnailTokens,
    /// Drop query parameters whose key names a size
    StripSizeQueryKeys,
    /// `_<W>x<H>_` becomes `_`
    CollapseInlineDimensions,
    /// Drop `w=<digits>`-style parameters and dangling separators
    StripNumericSizeParams,
}

impl CanonicalRule {
    pub const ORDERED: [Self; 5] = [
        Self::DropSmallDimensionSegments,
        Self::ReplaceThumbnailTokens,
        Self::StripSizeQueryKeys,
        Self::CollapseInlineDimensions,
        Self::StripNumericSizeParams,
    ];
}

impl fmt::Display for CanonicalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DropSmallDimensionSegments => "drop-small-dimension-segments",
            Self::ReplaceThumbnailTokens => "replace-thumbnail-tokens",
            Self::StripSizeQueryKeys => "strip-size-query-keys",
            Self::CollapseInlineDimensions => "collapse-inline-dimensions",
            Self::StripNumericSizeParams => "strip-numeric-size-params",
        };
        f.write_str(label)
    }
}

/// Applies [`CanonicalRule::ORDERED`] to normalized URLs
#[derive(Debug, Clone)]
pub struct SizeCanonicalizer {
    small_dimension_threshold: u64,
    thumbnail_tokens: Vec<String>,
    full_size_token: String,
    /// `_` followed by the full-size token
    small_suffix_replacement: String,
    size_key_substrings: Vec<String>,
    size_key_suffixes: Vec<String>,

    dimension_segment: Regex,
    /// `thumb`, `thumbnail`, `thumbs` ... anywhere in the path
    thumbnail_word: Regex,
    /// `_small` anywhere in the path (`p1_small2.jpg`)
    small_suffix: Regex,
    inline_dimension: Regex,
    numeric_size_param: Regex,
}

impl SizeCanonicalizer {
    pub fn new(config: &ResolverConfig) -> ParsingResult<Self> {
        let config = config.normalized();
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| ParsingError::invalid_pattern(name, e))
        };

        Ok(Self {
            small_dimension_threshold: u64::from(config.small_dimension_threshold),
            thumbnail_tokens: config.keywords.thumbnail_tokens,
            small_suffix_replacement: format!("_{}", config.keywords.full_size_token),
            full_size_token: config.keywords.full_size_token,
            size_key_substrings: config.keywords.size_query_substrings,
            size_key_suffixes: config.keywords.size_query_suffixes,
            dimension_segment: compile("dimension_segment", r"(?i)^(\d+)x(\d+)$")?,
            thumbnail_word: compile("thumbnail_word", r"(?i)thumb(?:nail)?s?")?,
            small_suffix: compile("small_suffix", r"(?i)_small")?,
            inline_dimension: compile("inline_dimension", r"(?i)_\d+x\d+_")?,
            numeric_size_param: compile("numeric_size_param", r"(?i)^(?:w|width|h|height|size)=\d+$")?,
        })
    }

    /// Apply every rule in order
    pub fn canonicalize(&self, url: &Url) -> Url {
        let mut canonical = url.clone();
        for rule in CanonicalRule::ORDERED {
            self.apply(rule, &mut canonical);
        }
        if canonical != *url {
            trace!("Canonicalized {} -> {}", url, canonical);
        }
        canonical
    }

    /// Apply a single rule in place
    pub fn apply(&self, rule: CanonicalRule, url: &mut Url) {
        match rule {
            CanonicalRule::DropSmallDimensionSegments => self.drop_small_dimension_segments(url),
            CanonicalRule::ReplaceThumbnailTokens => self.replace_thumbnail_tokens(url),
            CanonicalRule::StripSizeQueryKeys => {
                Self::retain_query(url, |piece| !self.is_size_key(query_key(piece)));
            }
            CanonicalRule::CollapseInlineDimensions => self.collapse_inline_dimensions(url),
            CanonicalRule::StripNumericSizeParams => {
                Self::retain_query(url, |piece| !self.numeric_size_param.is_match(piece));
            }
        }
    }

    fn drop_small_dimension_segments(&self, url: &mut Url) {
        let Some(segments) = url.path_segments() else {
            return;
        };
        let segments: Vec<&str> = segments.collect();
        let kept: Vec<&str> = segments
            .iter()
            .copied()
            .filter(|segment| !self.is_small_dimension_segment(segment))
            .collect();

        if kept.len() != segments.len() {
            let path = format!("/{}", kept.join("/"));
            url.set_path(&path);
        }
    }

    fn is_small_dimension_segment(&self, segment: &str) -> bool {
        let Some(captures) = self.dimension_segment.captures(segment) else {
            return false;
        };
        let is_small = |index: usize| {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .is_some_and(|dimension| dimension <= self.small_dimension_threshold)
        };
        is_small(1) || is_small(2)
    }

    fn replace_thumbnail_tokens(&self, url: &mut Url) {
        let tokens = self.replace_whole_tokens(url.path());
        let words = self
            .thumbnail_word
            .replace_all(&tokens, NoExpand(&self.full_size_token));
        let rewritten = self
            .small_suffix
            .replace_all(&words, NoExpand(&self.small_suffix_replacement));

        if rewritten != url.path() {
            url.set_path(&rewritten);
        }
    }

    /// Delimited tokens from the thumbnail table become the full-size token
    fn replace_whole_tokens(&self, path: &str) -> String {
        let mut rewritten = String::with_capacity(path.len());

        for piece in path.split_inclusive(is_token_delimiter) {
            let token = piece.strip_suffix(is_token_delimiter).unwrap_or(piece);
            let delimiter = piece.get(token.len()..).unwrap_or_default();

            if self.thumbnail_tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
                rewritten.push_str(&self.full_size_token);
            } else {
                rewritten.push_str(token);
            }
            rewritten.push_str(delimiter);
        }
        rewritten
    }

    fn collapse_inline_dimensions(&self, url: &mut Url) {
        let mut path = url.path().to_string();
        loop {
            let next = self.inline_dimension.replace_all(&path, "_").into_owned();
            if next == path {
                break;
            }
            path = next;
        }
        if path != url.path() {
            url.set_path(&path);
        }
    }

    fn is_size_key(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.size_key_suffixes.iter().any(|suffix| key.ends_with(suffix.as_str()))
            || self.size_key_substrings.iter().any(|needle| key.contains(needle.as_str()))
    }

    /// Keep query pieces matching `keep`; empty pieces and an empty query are dropped
    fn retain_query(url: &mut Url, keep: impl Fn(&str) -> bool) {
        let Some(query) = url.query() else {
            return;
        };
        let kept: Vec<&str> = query.split('&').filter(|piece| !piece.is_empty() && keep(piece)).collect();
        let rebuilt = kept.join("&");

        if rebuilt.is_empty() {
            url.set_query(None);
        } else if rebuilt != query {
            url.set_query(Some(&rebuilt));
        }
    }
}

fn query_key(piece: &str) -> &str {
    piece.split_once('=').map_or(piece, |(key, _)| key)
}
