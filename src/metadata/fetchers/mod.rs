//! Concrete retrieval strategies.
//!
//! Each submodule implements the
//! [`MetadataFetcher`](super::MetadataFetcher) trait for one
//! [`ProviderMethod`](linkmeta_common::ProviderMethod).

pub mod oembed;
pub mod opengraph;
pub mod scrape;

pub use oembed::{OembedFetcher, MAX_REDIRECTS};
pub use opengraph::{HtmlTagReader, OpenGraphFetcher, TagReader};
pub use scrape::{Recipe, ScrapeFetcher};

use linkmeta_common::{Error, Result};
use scraper::Selector;

/// Parse a CSS selector. Selectors are compile-time constants, so a failure
/// here is an internal fault rather than a remote one.
fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::internal(format!("invalid selector {css:?}: {e}")))
}
