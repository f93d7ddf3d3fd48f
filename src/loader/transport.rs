//! Byte transports behind the document loader.
//!
//! The loader only needs "give me the body at this URL". Keeping that behind
//! a trait lets tests script response timing without a network.

use crate::loader::error::LoadError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait StyleTransport: Send + Sync {
    /// Fetch the raw body at `url`. Non-2xx responses are errors.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, LoadError>;
}

/// HTTP(S) through `reqwest`, `file://` through `tokio::fs`.
///
/// Requests carry no custom headers and no timeout; auth and timeouts belong
/// to whoever configures the `reqwest::Client`.
#[derive(Clone, Debug, Default)]
pub struct DefaultTransport {
    http: Client,
}

impl DefaultTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    async fn fetch_http(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| LoadError::network(url.as_str(), err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::status(url.as_str(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| LoadError::network(url.as_str(), err.to_string()))?;
        debug!(url = %url, bytes = body.len(), "fetched style document");
        Ok(body.to_vec())
    }

    async fn fetch_file(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        let path = url
            .to_file_path()
            .map_err(|()| LoadError::network(url.as_str(), "not a local file path"))?;
        tokio::fs::read(&path)
            .await
            .map_err(|source| LoadError::Io { path, source })
    }
}

#[async_trait]
impl StyleTransport for DefaultTransport {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => self.fetch_file(url).await,
            other => Err(LoadError::UnsupportedScheme {
                scheme: other.to_string(),
                url: url.to_string(),
            }),
        }
    }
}
