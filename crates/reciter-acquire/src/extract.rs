//! Candidate extraction from image search results.
//!
//! The search provider has no stable API, so pulling a thumbnail URL out of
//! its response is best-effort. Each strategy sits behind [`ImageExtractor`]
//! so the matching rule can change without touching the locator or pipeline.

use crate::config::ExtractorKind;
use crate::error::AcquireError;
use regex::Regex;
use scraper::{Html, Selector};

/// Pulls the first candidate image URL out of a search response body.
pub trait ImageExtractor {
    fn extract(&self, body: &str) -> Option<String>;
}

/// Build the extractor selected in configuration.
pub fn build_extractor(
    kind: ExtractorKind,
    pattern: &str,
) -> Result<Box<dyn ImageExtractor>, AcquireError> {
    Ok(match kind {
        ExtractorKind::Pattern => Box::new(PatternExtractor::new(pattern)?),
        ExtractorKind::ImgTag => Box::new(ImgTagExtractor::new(pattern)?),
    })
}

/// Scans the raw body text for the first match of a URL pattern.
///
/// Works on script-embedded URLs that never appear in an attribute.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    pattern: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self, AcquireError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl ImageExtractor for PatternExtractor {
    fn extract(&self, body: &str) -> Option<String> {
        self.pattern.find(body).map(|m| m.as_str().to_string())
    }
}

/// Parses the body as HTML and returns the first `<img>` whose `src` or
/// `data-src` contains a match of the pattern.
///
/// Attribute values are entity-decoded by the parser, so `&amp;` inside a
/// thumbnail URL does not cut the match short.
#[derive(Debug, Clone)]
pub struct ImgTagExtractor {
    pattern: Regex,
    img: Selector,
}

impl ImgTagExtractor {
    pub fn new(pattern: &str) -> Result<Self, AcquireError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            img: Selector::parse("img").expect("valid selector"),
        })
    }
}

impl ImageExtractor for ImgTagExtractor {
    fn extract(&self, body: &str) -> Option<String> {
        let document = Html::parse_document(body);
        let found = document
            .select(&self.img)
            .flat_map(|img| ["src", "data-src"].into_iter().filter_map(move |a| img.value().attr(a)))
            .find_map(|value| self.pattern.find(value))
            .map(|m| m.as_str().to_string());
        found
    }
}
