//! Routes a URL to the retrieval strategy its provider declares.

use std::sync::Arc;

use linkmeta_common::{Error, MetadataResult, ProviderMethod, Result};

use super::fetcher::MetadataFetcher;
use super::fetchers::{OembedFetcher, OpenGraphFetcher, ScrapeFetcher};
use super::http::HttpPageSource;
use crate::catalog::{ProviderCatalog, ProviderDefinition};
use crate::config::HttpConfig;

/// Resolves URLs against a catalog and hands them to the matching strategy.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use linkmeta::catalog::ProviderCatalog;
/// use linkmeta::config::HttpConfig;
/// use linkmeta::metadata::Dispatcher;
///
/// let catalog = Arc::new(ProviderCatalog::builtin()?);
/// let dispatcher = Dispatcher::from_config(catalog, &HttpConfig::default())?;
/// let metadata = dispatcher.resolve("https://vimeo.com/76979871").await?;
/// ```
pub struct Dispatcher {
    catalog: Arc<ProviderCatalog>,
    oembed: Arc<dyn MetadataFetcher>,
    opengraph: Arc<dyn MetadataFetcher>,
    scrape: Arc<dyn MetadataFetcher>,
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<ProviderCatalog>,
        oembed: Arc<dyn MetadataFetcher>,
        opengraph: Arc<dyn MetadataFetcher>,
        scrape: Arc<dyn MetadataFetcher>,
    ) -> Self {
        Self {
            catalog,
            oembed,
            opengraph,
            scrape,
        }
    }

    /// Dispatcher with the HTTP-backed fetchers.
    pub fn from_config(catalog: Arc<ProviderCatalog>, http: &HttpConfig) -> Result<Self> {
        let pages = Arc::new(HttpPageSource::new(http)?);
        Ok(Self::new(
            catalog,
            Arc::new(OembedFetcher::new(http)?),
            Arc::new(OpenGraphFetcher::from_pages(pages.clone())),
            Arc::new(ScrapeFetcher::new(pages)),
        ))
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// The provider `url` resolves to, if any.
    pub fn find(&self, url: &str) -> Option<&ProviderDefinition> {
        self.catalog.find(url)
    }

    /// Fetch metadata for `url` with the strategy `provider` declares.
    pub async fn dispatch(&self, url: &str, provider: &ProviderDefinition) -> Result<MetadataResult> {
        let fetcher = match &provider.method {
            ProviderMethod::Oembed => &self.oembed,
            ProviderMethod::OpenGraph => &self.opengraph,
            ProviderMethod::Scrape => &self.scrape,
            ProviderMethod::Unrecognized(method) => {
                return Err(Error::UnsupportedProviderMethod(method.clone()));
            }
        };
        tracing::debug!(url, provider = %provider.name, fetcher = fetcher.name(), "dispatching");
        fetcher.fetch(url, provider).await
    }

    /// Resolve `url` to a provider and fetch its metadata.
    pub async fn resolve(&self, url: &str) -> Result<MetadataResult> {
        let provider = self
            .find(url)
            .ok_or_else(|| Error::no_provider_found(url))?;
        self.dispatch(url, provider).await
    }
}
