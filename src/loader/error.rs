use std::path::PathBuf;
use thiserror::Error;

/// Why a document could not be loaded.
///
/// Every variant is terminal for the attempt that produced it; the loader
/// never retries. Cancellation is not represented here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} is not a valid style document: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} failed style schema validation:\n{}", .details.join("\n"))]
    Schema { origin: String, details: Vec<String> },

    #[error("unsupported URL scheme '{scheme}' for {url}")]
    UnsupportedScheme { scheme: String, url: String },
}

impl LoadError {
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }
}
