//! HTML image resolution infrastructure
//!
//! Strategy-based candidate extraction over `scraper` documents followed by URL
//! normalization, size canonicalization and ranking.

pub mod candidate_extractor;
pub mod config;
pub mod context;
pub mod error;
pub mod image_ranker;
pub mod image_resolver;
pub mod size_canonicalizer;
pub mod strategies;
pub mod url_normalizer;

// Re-export public types
pub use candidate_extractor::CandidateExtractor;
pub use config::ResolverConfig;
pub use context::ImageParseContext;
pub use error::{ParsingError, ParsingResult};
pub use image_ranker::{ImageRanker, ResolvedImage};
pub use image_resolver::ImageResolver;
pub use size_canonicalizer::{CanonicalRule, SizeCanonicalizer};
pub use strategies::CandidateStrategy;
pub use url_normalizer::UrlNormalizer;
