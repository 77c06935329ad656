//! Trait definition shared by the retrieval strategies.
//!
//! Each strategy (oEmbed endpoint lookup, OpenGraph tags, HTML scraping)
//! implements [`MetadataFetcher`] and returns the common
//! [`MetadataResult`] shape.

use async_trait::async_trait;
use linkmeta_common::{MetadataResult, Result};

use crate::catalog::ProviderDefinition;

/// Async trait that all retrieval strategies implement.
///
/// Fetchers are shared behind an `Arc` by the dispatcher and must not keep
/// per-call state.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Short, lowercase identifier for this strategy (e.g. `"oembed"`).
    fn name(&self) -> &'static str;

    /// Retrieve metadata for `url`, which `provider` has already matched.
    async fn fetch(&self, url: &str, provider: &ProviderDefinition) -> Result<MetadataResult>;
}
