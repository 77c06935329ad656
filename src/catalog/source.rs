//! Catalog sources: the built-in provider lists and configured overrides.

use std::path::Path;

use anyhow::Context;
use linkmeta_common::{Error, ProviderMethod, Result};
use serde::Deserialize;

use super::definition::{ProviderDefinition, ProviderRecord};
use crate::config::CatalogConfig;

const BUILTIN_OEMBED: &str = include_str!("../../providers/oembed.toml");
const BUILTIN_OPENGRAPH: &str = include_str!("../../providers/opengraph.toml");
const BUILTIN_SCRAPE: &str = include_str!("../../providers/scrape.toml");

/// The kind of provider a source holds. Also the merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Oembed,
    OpenGraph,
    Scrape,
}

impl SourceKind {
    /// Fixed order in which sources are concatenated into the catalog.
    pub const ORDER: [SourceKind; 3] = [Self::Oembed, Self::OpenGraph, Self::Scrape];

    /// Method assigned to records that do not declare one.
    pub fn default_method(self) -> ProviderMethod {
        match self {
            Self::Oembed => ProviderMethod::Oembed,
            Self::OpenGraph => ProviderMethod::OpenGraph,
            Self::Scrape => ProviderMethod::Scrape,
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            Self::Oembed => BUILTIN_OEMBED,
            Self::OpenGraph => BUILTIN_OPENGRAPH,
            Self::Scrape => BUILTIN_SCRAPE,
        }
    }

    fn configured(self, config: &CatalogConfig) -> Option<&Path> {
        match self {
            Self::Oembed => config.oembed.as_deref(),
            Self::OpenGraph => config.opengraph.as_deref(),
            Self::Scrape => config.scrape.as_deref(),
        }
    }
}

/// The text of one catalog source plus where it came from.
#[derive(Debug, Clone)]
pub struct SourceText {
    /// File path, or `builtin:<kind>`, used in error messages.
    pub origin: String,
    pub contents: String,
}

impl SourceText {
    pub fn new(origin: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            contents: contents.into(),
        }
    }

    /// Parse and validate every record in this source.
    pub fn definitions(&self, kind: SourceKind) -> Result<Vec<ProviderDefinition>> {
        #[derive(Deserialize)]
        struct CatalogFile {
            #[serde(default)]
            providers: Vec<ProviderRecord>,
        }

        let file: CatalogFile = toml::from_str(&self.contents)
            .map_err(|e| Error::config(format!("{}: {e}", self.origin)))?;

        file.providers
            .into_iter()
            .map(|record| {
                ProviderDefinition::from_record(record, kind.default_method()).map_err(|e| match e {
                    Error::Config(msg) => Error::config(format!("{}: {msg}", self.origin)),
                    other => other,
                })
            })
            .collect()
    }
}

/// One source per [`SourceKind`].
#[derive(Debug, Clone)]
pub struct CatalogSources {
    pub oembed: SourceText,
    pub opengraph: SourceText,
    pub scrape: SourceText,
}

impl CatalogSources {
    /// The provider lists compiled into the binary.
    pub fn builtin() -> Self {
        let text = |kind: SourceKind, label: &str| {
            SourceText::new(format!("builtin:{label}"), kind.builtin())
        };
        Self {
            oembed: text(SourceKind::Oembed, "oembed"),
            opengraph: text(SourceKind::OpenGraph, "opengraph"),
            scrape: text(SourceKind::Scrape, "scrape"),
        }
    }

    /// Built-in sources with any configured files substituted in.
    pub fn from_config(config: &CatalogConfig) -> anyhow::Result<Self> {
        let mut sources = Self::builtin();
        for kind in SourceKind::ORDER {
            let Some(path) = kind.configured(config) else {
                continue;
            };
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            let contents = std::fs::read_to_string(&expanded)
                .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
            tracing::debug!(?kind, path = %expanded, "loaded catalog source");
            *sources.get_mut(kind) = SourceText::new(expanded, contents);
        }
        Ok(sources)
    }

    pub fn get(&self, kind: SourceKind) -> &SourceText {
        match kind {
            SourceKind::Oembed => &self.oembed,
            SourceKind::OpenGraph => &self.opengraph,
            SourceKind::Scrape => &self.scrape,
        }
    }

    fn get_mut(&mut self, kind: SourceKind) -> &mut SourceText {
        match kind {
            SourceKind::Oembed => &mut self.oembed,
            SourceKind::OpenGraph => &mut self.opengraph,
            SourceKind::Scrape => &mut self.scrape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_sources_parse() {
        let sources = CatalogSources::builtin();
        for kind in SourceKind::ORDER {
            let defs = sources.get(kind).definitions(kind).unwrap();
            assert!(!defs.is_empty(), "{kind:?} builtin is empty");
            assert!(defs.iter().all(|d| d.method == kind.default_method()));
        }
    }

    #[test]
    fn test_record_aliases() {
        let text = SourceText::new(
            "inline",
            r#"
[[providers]]
name = "Example"
method = "opengraph"
urlPatterns = ["https://example.com/*"]
"#,
        );
        let defs = text.definitions(SourceKind::Scrape).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].method, ProviderMethod::OpenGraph);
    }

    #[test]
    fn test_empty_source() {
        let text = SourceText::new("inline", "");
        assert!(text.definitions(SourceKind::Oembed).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_source_names_origin() {
        let text = SourceText::new("custom.toml", "[[providers]]\nname = 3\n");
        let err = text.definitions(SourceKind::Oembed).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.starts_with("custom.toml:")));
    }

    #[test]
    fn test_from_config_overrides_one_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[providers]]\nname = \"Custom\"\nurl_schemes = [\"https://custom.test/*\"]"
        )
        .unwrap();

        let config = CatalogConfig {
            scrape: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let sources = CatalogSources::from_config(&config).unwrap();

        assert_eq!(sources.oembed.origin, "builtin:oembed");
        assert_eq!(sources.opengraph.origin, "builtin:opengraph");
        let defs = sources.scrape.definitions(SourceKind::Scrape).unwrap();
        assert_eq!(defs[0].name, "Custom");
        assert_eq!(defs[0].method, ProviderMethod::Scrape);
    }

    #[test]
    fn test_from_config_missing_file() {
        let config = CatalogConfig {
            oembed: Some("/nonexistent/oembed.toml".into()),
            ..Default::default()
        };
        assert!(CatalogSources::from_config(&config).is_err());
    }
}
