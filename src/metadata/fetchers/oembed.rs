//! oEmbed metadata fetcher.
//!
//! Implements [`MetadataFetcher`] by querying a provider's oEmbed endpoint.
//!
//! Features:
//! - Redirects followed by hand, at most [`MAX_REDIRECTS`] times. When the
//!   budget runs out the last response received is classified as-is, even if
//!   it is itself a redirect.
//! - Terminal responses classified into typed errors (501, 404, other).
//! - Only transport faults, unparseable redirect targets, and JSON faults are
//!   normalized; other errors propagate unchanged.

use async_trait::async_trait;
use linkmeta_common::{Error, MetadataResult, Result};
use reqwest::header::LOCATION;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::definition::endpoint_url;
use crate::catalog::ProviderDefinition;
use crate::config::HttpConfig;
use crate::metadata::fetcher::MetadataFetcher;
use crate::metadata::http;

/// Number of redirects followed before the current response is classified.
pub const MAX_REDIRECTS: u32 = 4;

/// Reported in place of a status code when no response was received.
const NO_STATUS: &str = "Error";

#[derive(Debug, Deserialize)]
struct OembedResponse {
    thumbnail_url: Option<String>,
    title: Option<String>,
    description: Option<String>,
    author_name: Option<String>,
}

impl From<OembedResponse> for MetadataResult {
    fn from(resp: OembedResponse) -> Self {
        MetadataResult {
            thumbnail_url: resp.thumbnail_url,
            title: resp.title,
            description: resp.description,
            author_name: resp.author_name,
        }
        .normalized()
    }
}

/// Parse an oEmbed JSON body.
pub fn parse_payload(body: &[u8]) -> Result<MetadataResult> {
    let resp: OembedResponse = serde_json::from_slice(body)?;
    Ok(resp.into())
}

/// oEmbed endpoint fetcher.
///
/// # Examples
///
/// ```no_run
/// use linkmeta::config::HttpConfig;
/// use linkmeta::metadata::fetchers::OembedFetcher;
///
/// let fetcher = OembedFetcher::new(&HttpConfig::default()).unwrap();
/// ```
pub struct OembedFetcher {
    client: Client,
}

impl OembedFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self::with_client(http::endpoint_client(config)?))
    }

    /// Use a caller-built client. It must not follow redirects on its own.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build the first request URL: the expanded endpoint plus `url=<url>`.
    pub fn request_url(provider: &ProviderDefinition, url: &str) -> Result<Url> {
        let template = provider.endpoint.as_deref().ok_or_else(|| {
            Error::config(format!("oembed provider '{}' has no endpoint", provider.name))
        })?;
        let mut endpoint = endpoint_url(template).map_err(Error::config)?;
        endpoint.query_pairs_mut().append_pair("url", url);
        Ok(endpoint)
    }

    /// GET `target`, following `Location` headers within the redirect budget.
    async fn get_following(&self, mut target: Url) -> Result<Response> {
        let mut remaining = MAX_REDIRECTS;
        let mut last_status: Option<StatusCode> = None;

        loop {
            debug!(url = %target, remaining, "requesting oEmbed endpoint");
            let response = self
                .client
                .get(target.clone())
                .send()
                .await
                .map_err(|e| {
                    debug!(url = %target, error = %e, "oEmbed request failed");
                    unknown_response(last_status)
                })?;
            let status = response.status();
            last_status = Some(status);

            let Some(location) = response.headers().get(LOCATION) else {
                return Ok(response);
            };
            if remaining == 0 {
                debug!(%status, "redirect budget exhausted");
                return Ok(response);
            }
            remaining -= 1;

            // The Location is requested as given; `url=` is not re-appended.
            target = location
                .to_str()
                .ok()
                .and_then(|loc| target.join(loc).ok())
                .ok_or_else(|| {
                    debug!(?location, "unparseable redirect target");
                    unknown_response(last_status)
                })?;
            debug!(%status, next = %target, "following redirect");
        }
    }

    /// Turn the terminal response into metadata or a typed error.
    async fn classify(response: Response, original_url: &str) -> Result<MetadataResult> {
        let status = response.status();
        match status {
            StatusCode::NOT_IMPLEMENTED => Err(Error::UnknownFormat),
            StatusCode::NOT_FOUND => Err(Error::not_found(original_url)),
            s if s.is_success() => {
                let body = response.bytes().await.map_err(|e| {
                    debug!(error = %e, "oEmbed body could not be read");
                    unknown_response(Some(status))
                })?;
                parse_payload(&body)
            }
            s => Err(Error::unknown_response(s.as_str())),
        }
    }
}

fn unknown_response(status: Option<StatusCode>) -> Error {
    match status {
        Some(s) => Error::unknown_response(s.as_str()),
        None => Error::unknown_response(NO_STATUS),
    }
}

#[async_trait]
impl MetadataFetcher for OembedFetcher {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn fetch(&self, url: &str, provider: &ProviderDefinition) -> Result<MetadataResult> {
        let request = Self::request_url(provider, url)?;
        let response = self.get_following(request).await?;
        Self::classify(response, url).await
    }
}
