use crate::error::AcquireError;
use reqwest::{Client, Response};
use std::time::Duration;

/// Build the shared client. Every outbound request carries the same
/// browser-like user agent.
pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, AcquireError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(AcquireError::Client)
}

/// Issue a GET and fail on any non-2xx status.
pub(crate) async fn get(client: &Client, url: &str) -> Result<Response, AcquireError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| AcquireError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AcquireError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(response)
}

/// GET a page and decode its body as text.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String, AcquireError> {
    get(client, url)
        .await?
        .text()
        .await
        .map_err(|source| AcquireError::Http {
            url: url.to_string(),
            source,
        })
}
