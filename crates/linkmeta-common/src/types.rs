//! Core type definitions for providers and extracted metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Retrieval strategy declared by a catalog entry.
///
/// Values are read from configuration as lowercase strings. A value with no
/// implementation is kept as [`ProviderMethod::Unrecognized`] so the dispatch
/// site has to handle it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderMethod {
    /// Structured-metadata endpoint lookup (oEmbed).
    Oembed,
    /// Page metadata tags (OpenGraph).
    OpenGraph,
    /// Provider-specific HTML scraping.
    Scrape,
    /// A configured method name with no strategy behind it.
    Unrecognized(String),
}

impl ProviderMethod {
    /// Configuration spelling of this method.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Oembed => "oembed",
            Self::OpenGraph => "opengraph",
            Self::Scrape => "scrape",
            Self::Unrecognized(other) => other,
        }
    }
}

impl From<&str> for ProviderMethod {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "oembed" => Self::Oembed,
            "opengraph" => Self::OpenGraph,
            "scrape" => Self::Scrape,
            _ => Self::Unrecognized(value.to_string()),
        }
    }
}

impl From<String> for ProviderMethod {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ProviderMethod> for String {
    fn from(method: ProviderMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for ProviderMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata extracted for a single URL.
///
/// Every field is optional. `None` means the field was not extracted; an
/// extracted value is never an empty string (see [`MetadataResult::normalized`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl MetadataResult {
    /// Trim every field and drop the ones left empty.
    pub fn normalized(self) -> Self {
        Self {
            thumbnail_url: non_empty(self.thumbnail_url),
            title: non_empty(self.title),
            description: non_empty(self.description),
            author_name: non_empty(self.author_name),
        }
    }

    /// True when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    /// Extracted fields as `(label, value)` pairs in display order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("title", &self.title),
            ("author", &self.author_name),
            ("description", &self.description),
            ("thumbnail", &self.thumbnail_url),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!(ProviderMethod::from("oembed"), ProviderMethod::Oembed);
        assert_eq!(ProviderMethod::from("OpenGraph"), ProviderMethod::OpenGraph);
        assert_eq!(ProviderMethod::from(" scrape "), ProviderMethod::Scrape);
        assert_eq!(
            ProviderMethod::from("microdata"),
            ProviderMethod::Unrecognized("microdata".to_string())
        );
    }

    #[test]
    fn test_method_display() {
        assert_eq!(ProviderMethod::Oembed.to_string(), "oembed");
        assert_eq!(ProviderMethod::OpenGraph.to_string(), "opengraph");
        assert_eq!(ProviderMethod::Scrape.to_string(), "scrape");
        assert_eq!(
            ProviderMethod::Unrecognized("rss".into()).to_string(),
            "rss"
        );
    }

    #[test]
    fn test_method_serde() {
        let method: ProviderMethod = serde_json::from_str("\"opengraph\"").unwrap();
        assert_eq!(method, ProviderMethod::OpenGraph);

        let json = serde_json::to_string(&ProviderMethod::Scrape).unwrap();
        assert_eq!(json, "\"scrape\"");
    }

    #[test]
    fn test_normalized_drops_blank_fields() {
        let result = MetadataResult {
            thumbnail_url: Some(String::new()),
            title: Some("  Dune  ".to_string()),
            description: Some(" \n\t".to_string()),
            author_name: Some("Frank Herbert".to_string()),
        }
        .normalized();

        assert_eq!(result.thumbnail_url, None);
        assert_eq!(result.title.as_deref(), Some("Dune"));
        assert_eq!(result.description, None);
        assert_eq!(result.author_name.as_deref(), Some("Frank Herbert"));
    }

    #[test]
    fn test_fields_and_is_empty() {
        assert!(MetadataResult::default().is_empty());

        let result = MetadataResult {
            title: Some("X".into()),
            thumbnail_url: Some("https://img/x.jpg".into()),
            ..Default::default()
        };
        let fields: Vec<_> = result.fields().collect();
        assert_eq!(
            fields,
            vec![("title", "X"), ("thumbnail", "https://img/x.jpg")]
        );
        assert!(!result.is_empty());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let result = MetadataResult {
            title: Some("X".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"title":"X"}"#);
    }
}
