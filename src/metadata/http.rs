//! HTTP plumbing shared by the fetchers.
//!
//! The oEmbed fetcher gets a client that never follows redirects on its own
//! and keeps no idle connections, so every hop of its redirect loop opens a
//! fresh connection. Page fetches for OpenGraph and scraping use a client with
//! the default redirect policy.

use async_trait::async_trait;
use linkmeta_common::{Error, Result};
use reqwest::{redirect, Client, StatusCode};
use tracing::debug;

use crate::config::HttpConfig;

/// Client used for oEmbed endpoint lookups.
pub fn endpoint_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .redirect(redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))
}

/// Client used for fetching HTML pages.
pub fn page_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))
}

/// Map a terminal HTTP status on `url` to an error, or `None` when successful.
pub(crate) fn status_error(status: StatusCode, url: &str) -> Option<Error> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(Error::not_found(url))
    } else {
        Some(Error::unknown_response(status.as_str()))
    }
}

/// Capability for fetching an HTML document.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the document at `url` and return its body.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// [`PageSource`] backed by `reqwest`.
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self::with_client(page_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            debug!(url, error = %e, "page request failed");
            Error::unknown_response("Error")
        })?;

        let status = response.status();
        if let Some(err) = status_error(status, url) {
            return Err(err);
        }

        response.text().await.map_err(|e| {
            debug!(url, error = %e, "page body could not be read");
            Error::unknown_response(status.as_str())
        })
    }
}
