//! Remote asset fetching and decoding
//!
//! The fetch side of the asset cache sits behind a trait so the cache can
//! run against a stub in tests. The production implementation does a
//! blocking HTTP GET and decodes the body as PNG into a render-ready
//! pixmap; it only ever runs on the dedicated fetch worker thread, never
//! on the event loop.

use thiserror::Error;
use tiny_skia::Pixmap;

/// Asset fetch/decode failures. Non-fatal: callers degrade gracefully and
/// render without the asset.
#[derive(Debug, Error)]
pub enum AssetFetchError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode {url} as PNG: {message}")]
    Decode { url: String, message: String },
}

/// Fetches and decodes one remote asset by identifier.
pub trait AssetFetcher: Send {
    fn fetch(&self, url: &str) -> Result<Pixmap, AssetFetchError>;
}

/// Production fetcher: blocking HTTP GET plus PNG decode
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Pixmap, AssetFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| AssetFetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| AssetFetchError::Http {
            url: url.to_string(),
            source,
        })?;

        Pixmap::decode_png(&body).map_err(|err| AssetFetchError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}
