use crate::error::AcquireError;
use crate::extract::ImageExtractor;
use crate::http;
use reqwest::Client;
use url::Url;

/// Fixed image-search parameters: image vertical, homepage source, and a
/// desktop viewport so the provider serves the full results page.
const SEARCH_PARAMS: &[(&str, &str)] = &[
    ("site", ""),
    ("tbm", "isch"),
    ("source", "hp"),
    ("biw", "1873"),
    ("bih", "990"),
];

/// Finds a candidate image URL for a free-text query.
pub struct ImageLocator {
    client: Client,
    endpoint: Url,
    extractor: Box<dyn ImageExtractor>,
}

impl ImageLocator {
    pub fn new(
        client: Client,
        search_url: &str,
        extractor: Box<dyn ImageExtractor>,
    ) -> Result<Self, AcquireError> {
        let endpoint = Url::parse(search_url).map_err(|source| AcquireError::Endpoint {
            url: search_url.to_string(),
            source,
        })?;
        Ok(Self {
            client,
            endpoint,
            extractor,
        })
    }

    /// The full search URL for `query`, with the query form-encoded.
    pub fn search_url(&self, query: &str) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .extend_pairs(SEARCH_PARAMS)
            .append_pair("q", query);
        url.to_string()
    }

    /// Search and extract, keeping transport failures distinct from
    /// "no match".
    pub async fn try_locate(&self, query: &str) -> Result<Option<String>, AcquireError> {
        let url = self.search_url(query);
        let body = http::get_text(&self.client, &url).await?;
        tracing::debug!(bytes = body.len(), "Received search results");
        Ok(self.extractor.extract(&body))
    }

    /// Search and extract. Any failure is logged and reported as no candidate.
    pub async fn locate(&self, query: &str) -> Option<String> {
        match self.try_locate(query).await {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!(query = %query, "Error scraping: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THUMBNAIL_PATTERN;
    use crate::extract::PatternExtractor;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn locator(search_url: &str, pattern: &str) -> ImageLocator {
        let client = http::build_client("test-agent", Duration::from_secs(5)).unwrap();
        let extractor = Box::new(PatternExtractor::new(pattern).unwrap());
        ImageLocator::new(client, search_url, extractor).unwrap()
    }

    #[test]
    fn test_search_url_encodes_query() {
        let locator = locator("https://www.google.com/search", DEFAULT_THUMBNAIL_PATTERN);
        let url = Url::parse(&locator.search_url("القارئ ماهر")).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("www.google.com"));
        assert!(pairs.contains(&("tbm".into(), "isch".into())));
        assert!(pairs.contains(&("biw".into(), "1873".into())));
        assert!(pairs.contains(&("q".into(), "القارئ ماهر".into())));
        assert!(url.as_str().is_ascii());
    }

    #[tokio::test]
    async fn test_locate_returns_first_thumbnail() {
        let server = MockServer::start().await;
        let body = "<img src=\"https://thumbs.test/t?id=one\"><img src=\"https://thumbs.test/t?id=two\">";
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Saad Al-Ghamdi"))
            .and(query_param("tbm", "isch"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let locator = locator(&format!("{}/search", server.uri()), r"https://thumbs\.test/t\?id=\w+");
        assert_eq!(
            locator.locate("Saad Al-Ghamdi").await.as_deref(),
            Some("https://thumbs.test/t?id=one")
        );
    }

    #[tokio::test]
    async fn test_locate_collapses_failures_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "blocked"))
            .respond_with(ResponseTemplate::new(429).set_body_string("https://thumbs.test/t?id=x"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "empty"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let locator = locator(&format!("{}/search", server.uri()), r"https://thumbs\.test/t\?id=\w+");

        assert!(matches!(
            locator.try_locate("blocked").await,
            Err(AcquireError::Status { .. })
        ));
        assert_eq!(locator.locate("blocked").await, None);

        assert!(matches!(locator.try_locate("empty").await, Ok(None)));
        assert_eq!(locator.locate("empty").await, None);
    }
}
