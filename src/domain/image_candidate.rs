//! Image candidate domain types
//!
//! A candidate is a raw image-URL sighting taken from a product page together
//! with the strategy that found it and the priority hint that strategy assigns.
//! Candidates are transient: they live for a single resolution pass.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative rank used to order otherwise undifferentiated results.
///
/// Variants are declared lowest first so that the derived `Ord` matches the
/// ranking: `Zoom > Product > Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityClass {
    /// No relevance signal
    Default,
    /// Product keyword match (product, gallery, main, `/p/` ...)
    Product,
    /// Explicit zoom / large-format marker
    Zoom,
}

impl PriorityClass {
    /// Higher of the two classes
    pub fn promote(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Default => "default",
            Self::Product => "product",
            Self::Zoom => "zoom",
        };
        f.write_str(label)
    }
}

/// Extraction strategy that produced a candidate, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Explicit zoom/gallery `data-*` attributes
    ZoomAttribute,
    /// `srcset` lists and `img` source fallbacks
    ResponsiveImageSet,
    /// Lazy-load attributes not read by the responsive pass
    LazyAttribute,
    /// `img` sources matching product keywords
    KeywordImage,
    /// Known vendor state schema inside a JSON script
    VendorJson,
    /// Generic image-key walk over a JSON script
    StructuredJson,
    /// Array literals inside non-JSON scripts
    ScriptArray,
    /// `JSON.parse("...")` payloads inside non-JSON scripts
    EmbeddedJson,
}

impl Strategy {
    /// Candidates from this strategy are already full size and bypass canonicalization
    pub const fn is_already_maximal(self) -> bool {
        matches!(self, Self::VendorJson)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ZoomAttribute => "zoom-attribute",
            Self::ResponsiveImageSet => "responsive-image-set",
            Self::LazyAttribute => "lazy-attribute",
            Self::KeywordImage => "keyword-image",
            Self::VendorJson => "vendor-json",
            Self::StructuredJson => "structured-json",
            Self::ScriptArray => "script-array",
            Self::EmbeddedJson => "embedded-json",
        };
        f.write_str(label)
    }
}

/// Raw, not yet normalized image URL sighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// URL exactly as found in the markup (trimmed)
    pub raw_url: String,
    /// Strategy that found it
    pub strategy: Strategy,
    /// Priority hint assigned by the strategy
    pub priority: PriorityClass,
}

impl Candidate {
    /// Create a candidate with an explicit priority hint
    pub fn new(raw_url: impl Into<String>, strategy: Strategy, priority: PriorityClass) -> Self {
        Self {
            raw_url: raw_url.into().trim().to_string(),
            strategy,
            priority,
        }
    }

    /// Create a candidate without a priority hint
    pub fn unranked(raw_url: impl Into<String>, strategy: Strategy) -> Self {
        Self::new(raw_url, strategy, PriorityClass::Default)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.raw_url, self.strategy, self.priority)
    }
}
