//! Candidate extraction strategies
//!
//! Each strategy is an independent pass over the document that returns the
//! raw image references it recognizes, in document order. Strategies never
//! fail on content: a malformed attribute, script or JSON fragment yields no
//! candidates and the pass moves on.

pub mod attributes;
pub mod inline_script;
pub mod json_walk;
pub mod keyword;
pub mod lazy;
pub mod responsive;
pub mod structured_json;

pub use attributes::ZoomAttributeStrategy;
pub use inline_script::InlineScriptStrategy;
pub use keyword::KeywordImageStrategy;
pub use lazy::LazyAttributeStrategy;
pub use responsive::ResponsiveImageStrategy;
pub use structured_json::StructuredJsonStrategy;

use super::{ParsingError, ParsingResult};
use crate::domain::Candidate;
use scraper::{ElementRef, Html, Selector};

/// One extraction pass over a parsed document
pub trait CandidateStrategy: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Candidates found in the document, in discovery order
    fn extract(&self, document: &Html) -> Vec<Candidate>;
}

/// Compile a selector string, reporting the offending selector on failure
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}

/// Selector matching any element carrying at least one of the attributes
///
/// `None` when the table is empty.
pub(crate) fn attribute_selector(element: &str, attributes: &[String]) -> ParsingResult<Option<Selector>> {
    if attributes.is_empty() {
        return Ok(None);
    }

    let selector = attributes
        .iter()
        .map(|attribute| format!("{element}[{}]", attribute.trim()))
        .collect::<Vec<_>>()
        .join(", ");

    compile_selector(&selector).map(Some)
}

/// Trimmed, non-empty attribute value
pub(crate) fn attribute_value<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Whether the element is an `img`
pub(crate) fn is_img(element: &ElementRef<'_>) -> bool {
    element.value().name().eq_ignore_ascii_case("img")
}

/// Concatenated text of a script element
pub(crate) fn script_body(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_selector_matches_any_listed_attribute() {
        let selector = attribute_selector("", &["data-a".to_string(), "data-b".to_string()])
            .unwrap()
            .unwrap();
        let html = Html::parse_document(r#"<div data-b="x"></div><span data-a="y"></span><p></p>"#);
        assert_eq!(html.select(&selector).count(), 2);
    }

    #[test]
    fn test_attribute_selector_rejects_bad_names() {
        let result = attribute_selector("", &["data zoom".to_string()]);
        assert!(matches!(result, Err(ParsingError::InvalidSelector { .. })));
        assert!(attribute_selector("img", &[]).unwrap().is_none());
    }

    #[test]
    fn test_attribute_value_skips_blank() {
        let html = Html::parse_fragment(r#"<img src="  " data-src=" /a.jpg ">"#);
        let selector = Selector::parse("img").unwrap();
        let img = html.select(&selector).next().unwrap();
        assert_eq!(attribute_value(&img, "src"), None);
        assert_eq!(attribute_value(&img, "data-src"), Some("/a.jpg"));
        assert!(is_img(&img));
    }
}
