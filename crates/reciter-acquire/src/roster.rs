use crate::error::AcquireError;
use crate::http;
use reciter_model::{Reciter, RosterResponse};
use reqwest::Client;
use url::Url;

/// Source of the canonical reciter roster.
pub struct RosterSource {
    client: Client,
    url: String,
}

impl RosterSource {
    /// `endpoint` is the roster URL without the language parameter.
    pub fn new(client: Client, endpoint: &str, language: &str) -> Result<Self, AcquireError> {
        let url = Url::parse_with_params(endpoint, &[("language", language)]).map_err(
            |source| AcquireError::Endpoint {
                url: endpoint.to_string(),
                source,
            },
        )?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the roster, reporting why it failed.
    pub async fn try_fetch(&self) -> Result<Vec<Reciter>, AcquireError> {
        let body = http::get_text(&self.client, &self.url).await?;
        tracing::debug!(bytes = body.len(), "Received roster");
        parse_roster(&body)
    }

    /// Fetch the roster, degrading any failure to an empty list.
    pub async fn fetch_reciters(&self) -> Vec<Reciter> {
        tracing::info!(url = %self.url, "Fetching reciters list");
        match self.try_fetch().await {
            Ok(reciters) => reciters,
            Err(e) => {
                tracing::error!(url = %self.url, "Error fetching reciters: {e}");
                Vec::new()
            }
        }
    }
}

/// Parse a roster body, keeping API order and dropping unusable records.
pub fn parse_roster(body: &str) -> Result<Vec<Reciter>, AcquireError> {
    let response: RosterResponse = serde_json::from_str(body)?;
    let total = response.reciters.len();

    let mut reciters = Vec::with_capacity(total);
    for (index, record) in response.reciters.into_iter().enumerate() {
        match record.into_reciter() {
            Ok(reciter) => reciters.push(reciter),
            Err(e) => tracing::warn!(index, "Dropping roster record: {e}"),
        }
    }

    if reciters.len() < total {
        tracing::warn!(kept = reciters.len(), total, "Some roster records were unusable");
    }

    Ok(reciters)
}
