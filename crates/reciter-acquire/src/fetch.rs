use crate::error::AcquireError;
use crate::http;
use reqwest::Client;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Downloads a URL to a file.
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` and write the body verbatim to `destination`,
    /// replacing any existing file. Returns the number of bytes written.
    ///
    /// The body is written to a sibling `.part` file and renamed into place,
    /// so `destination` only ever exists complete.
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64, AcquireError> {
        let response = http::get(&self.client, url).await?;
        let bytes = response.bytes().await.map_err(|source| AcquireError::Http {
            url: url.to_string(),
            source,
        })?;

        let partial = partial_path(destination);
        if let Err(source) = tokio::fs::write(&partial, &bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(AcquireError::Io {
                path: partial,
                source,
            });
        }
        if let Err(source) = tokio::fs::rename(&partial, destination).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(AcquireError::Io {
                path: destination.to_path_buf(),
                source,
            });
        }

        Ok(bytes.len() as u64)
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}
