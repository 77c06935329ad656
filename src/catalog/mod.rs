//! Provider catalog and URL-to-provider resolution.
//!
//! The catalog is assembled once at startup from three sources, always
//! concatenated in the order oEmbed, OpenGraph, scrape. Resolution walks the
//! catalog in that order and returns the first provider with a matching
//! pattern, so catalog order is the tie-break between overlapping providers.
//!
//! # Module layout
//!
//! - [`definition`] -- Catalog records and validated provider definitions.
//! - [`source`] -- Built-in and configured catalog sources.

pub mod definition;
pub mod source;

pub use definition::{ProviderDefinition, ProviderRecord};
pub use source::{CatalogSources, SourceKind, SourceText};

use linkmeta_common::Result;

/// An ordered, immutable sequence of provider definitions.
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    providers: Vec<ProviderDefinition>,
}

impl ProviderCatalog {
    /// Build a catalog from definitions already in resolution order.
    pub fn new(providers: Vec<ProviderDefinition>) -> Self {
        Self { providers }
    }

    /// Merge every source into a single catalog, in [`SourceKind::ORDER`].
    ///
    /// Any malformed record fails the whole assembly.
    pub fn assemble(sources: &CatalogSources) -> Result<Self> {
        let mut providers = Vec::new();
        for kind in SourceKind::ORDER {
            let defs = sources.get(kind).definitions(kind)?;
            tracing::debug!(?kind, count = defs.len(), "merged catalog source");
            providers.extend(defs);
        }
        Ok(Self { providers })
    }

    /// Catalog made only of the built-in sources.
    pub fn builtin() -> Result<Self> {
        Self::assemble(&CatalogSources::builtin())
    }

    /// Find the first provider, in catalog order, with a pattern matching `url`.
    ///
    /// Patterns are tried in declared order and the search stops at the first
    /// hit.
    pub fn find(&self, url: &str) -> Option<&ProviderDefinition> {
        self.providers.iter().find(|p| p.matches(url))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDefinition> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
