use crate::error::AcquireError;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ROSTER_URL: &str = "https://mp3quran.net/api/v3/reciters";
pub const DEFAULT_LANGUAGE: &str = "ar";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
/// "The reciter" in Arabic. Narrows the search toward portraits of the
/// person rather than unrelated matches on the name.
pub const DEFAULT_QUALIFIER: &str = "القارئ";
/// Google image-search thumbnails.
pub const DEFAULT_THUMBNAIL_PATTERN: &str =
    r"https://encrypted-tbn0\.gstatic\.com/images\?q=tbn:[\w\-]+";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_OUTPUT_DIR: &str = "assets/images/reciters";
pub const DEFAULT_PAUSE_MIN: Duration = Duration::from_millis(1000);
pub const DEFAULT_PAUSE_MAX: Duration = Duration::from_millis(3000);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How candidate URLs are pulled out of a search results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorKind {
    /// Regex scan over the raw response text.
    #[default]
    Pattern,
    /// Parse as HTML and match `<img>` source attributes.
    ImgTag,
}

/// Settings for one acquisition run.
#[derive(Debug, Clone)]
pub struct AcquireConfig {
    /// Roster endpoint, without the language parameter.
    pub roster_url: String,
    pub language: String,
    pub search_url: String,
    /// Term prefixed to every reciter name in search queries.
    pub qualifier: Option<String>,
    pub thumbnail_pattern: String,
    pub extractor: ExtractorKind,
    pub user_agent: String,
    /// Directory holding `<id>.jpg` files.
    pub output_dir: PathBuf,
    pub pause_min: Duration,
    pub pause_max: Duration,
    pub timeout: Duration,
    /// Stop after this many reciters have been searched.
    pub limit: Option<usize>,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            roster_url: DEFAULT_ROSTER_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            qualifier: Some(DEFAULT_QUALIFIER.to_string()),
            thumbnail_pattern: DEFAULT_THUMBNAIL_PATTERN.to_string(),
            extractor: ExtractorKind::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pause_min: DEFAULT_PAUSE_MIN,
            pause_max: DEFAULT_PAUSE_MAX,
            timeout: DEFAULT_TIMEOUT,
            limit: None,
        }
    }
}

impl AcquireConfig {
    /// Check everything that can be checked without touching the network.
    pub fn validate(&self) -> Result<(), AcquireError> {
        if self.pause_min > self.pause_max {
            return Err(AcquireError::Config(format!(
                "pause range is inverted ({:?} > {:?})",
                self.pause_min, self.pause_max
            )));
        }
        for endpoint in [&self.roster_url, &self.search_url] {
            Url::parse(endpoint).map_err(|source| AcquireError::Endpoint {
                url: endpoint.clone(),
                source,
            })?;
        }
        Regex::new(&self.thumbnail_pattern)?;
        Ok(())
    }

    /// The qualifier, treating an empty or blank string as absent.
    pub fn effective_qualifier(&self) -> Option<&str> {
        self.qualifier
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        AcquireConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_pattern_matches_google_thumbnail() {
        let re = Regex::new(DEFAULT_THUMBNAIL_PATTERN).unwrap();
        let html = r#"["https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcT-x_y9",300,200]"#;
        assert_eq!(
            re.find(html).unwrap().as_str(),
            "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcT-x_y9"
        );
        assert!(re.find("https://encrypted-tbn0Xgstatic.com/images?q=tbn:abc").is_none());
    }

    #[test]
    fn test_rejects_inverted_pause_range() {
        let config = AcquireConfig {
            pause_min: Duration::from_secs(3),
            pause_max: Duration::from_secs(1),
            ..AcquireConfig::default()
        };
        assert!(matches!(config.validate(), Err(AcquireError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_pattern_and_endpoint() {
        let config = AcquireConfig {
            thumbnail_pattern: "tbn:[".to_string(),
            ..AcquireConfig::default()
        };
        assert!(matches!(config.validate(), Err(AcquireError::Pattern(_))));

        let config = AcquireConfig {
            search_url: "not a url".to_string(),
            ..AcquireConfig::default()
        };
        assert!(matches!(config.validate(), Err(AcquireError::Endpoint { .. })));
    }

    #[test]
    fn test_blank_qualifier_is_absent() {
        let mut config = AcquireConfig::default();
        assert_eq!(config.effective_qualifier(), Some(DEFAULT_QUALIFIER));
        config.qualifier = Some("  ".to_string());
        assert_eq!(config.effective_qualifier(), None);
        config.qualifier = None;
        assert_eq!(config.effective_qualifier(), None);
    }
}
