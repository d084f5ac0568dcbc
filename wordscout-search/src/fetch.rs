//! Result page fetching.
//!
//! One GET per URL, a fixed User-Agent, a whole-request timeout, default
//! redirect following. Failures come back as [`FetchError`] so callers can
//! skip the page and carry on with the rest of the batch.

use crate::config::FetchConfig;
use crate::error::{FetchError, SearchError};
use crate::http;

/// Downloads result pages with a shared HTTP client.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration or
    /// [`SearchError::Http`] if the client cannot be constructed.
    pub fn new(config: &FetchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: http::build_fetch_client(config)?,
        })
    }

    /// Fetch the raw HTML at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] when the request exceeds the
    /// configured timeout, [`FetchError::Status`] for non-2xx responses,
    /// and [`FetchError::Transport`] for everything else (DNS, refused
    /// connection, TLS, body decoding).
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::trace!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| classify(url, &e))?;
        tracing::trace!(url, bytes = html.len(), "page received");
        Ok(html)
    }
}

fn classify(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
