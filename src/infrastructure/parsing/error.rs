//! Parsing error types for image resolution
//!
//! Content never fails resolution: malformed attributes, scripts and JSON
//! fragments are skipped. These errors cover resolver construction from
//! configuration, the string-level entry point, and the per-signal failures
//! that strategies log before moving on.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParsingError {
    #[error("Invalid page URL: {url} - {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },

    #[error("Malformed script data ({source_hint}): {reason}")]
    MalformedScriptData { source_hint: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, field: String },
}

impl ParsingError {
    pub fn invalid_base_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_pattern(name: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn url_resolution_failed(url: &str, reason: impl ToString, base_url: Option<&str>) -> Self {
        Self::UrlResolutionFailed {
            url: url.to_string(),
            reason: reason.to_string(),
            base_url: base_url.map(str::to_string),
        }
    }

    pub fn malformed_script_data(source_hint: &str, reason: impl ToString) -> Self {
        Self::MalformedScriptData {
            source_hint: source_hint.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn configuration(field: &str, message: impl ToString) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.to_string(),
        }
    }

    /// Per-signal failures are skipped; everything else stops construction or the call
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::UrlResolutionFailed { .. } | Self::MalformedScriptData { .. } => true,
            Self::InvalidBaseUrl { .. }
            | Self::InvalidSelector { .. }
            | Self::InvalidPattern { .. }
            | Self::ConfigurationError { .. } => false,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
