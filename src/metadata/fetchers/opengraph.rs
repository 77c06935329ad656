//! OpenGraph metadata fetcher.
//!
//! Reads the `<meta>` tags of a page through a [`TagReader`] and maps the
//! OpenGraph keys (with Twitter-card and plain HTML fallbacks) onto a
//! [`MetadataResult`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use linkmeta_common::{MetadataResult, Result};
use scraper::Html;

use super::selector;
use crate::catalog::ProviderDefinition;
use crate::metadata::fetcher::MetadataFetcher;
use crate::metadata::http::PageSource;

/// Key under which the document `<title>` is stored.
pub const DOCUMENT_TITLE: &str = "title";

const THUMBNAIL_KEYS: &[&str] = &[
    "og:image",
    "og:image:url",
    "og:image:secure_url",
    "twitter:image",
];
const TITLE_KEYS: &[&str] = &["og:title", "twitter:title", DOCUMENT_TITLE];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "description", "twitter:description"];
const AUTHOR_KEYS: &[&str] = &["article:author", "author", "twitter:creator"];

/// Capability for reading a page's metadata tags as key/value pairs.
#[async_trait]
pub trait TagReader: Send + Sync {
    async fn read_tags(&self, url: &str) -> Result<HashMap<String, String>>;
}

/// [`TagReader`] that fetches the page and parses its `<meta>` tags.
pub struct HtmlTagReader {
    pages: Arc<dyn PageSource>,
}

impl HtmlTagReader {
    pub fn new(pages: Arc<dyn PageSource>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl TagReader for HtmlTagReader {
    async fn read_tags(&self, url: &str) -> Result<HashMap<String, String>> {
        let html = self.pages.fetch_page(url).await?;
        extract_tags(&html)
    }
}

/// Collect `<meta>` key/value pairs from an HTML document.
///
/// Keys come from the `property` attribute, falling back to `name`, and are
/// lowercased. The first occurrence of a key wins. The document `<title>` is
/// recorded under [`DOCUMENT_TITLE`] unless a meta tag already uses that key.
pub fn extract_tags(html: &str) -> Result<HashMap<String, String>> {
    let document = Html::parse_document(html);
    let meta = selector("meta[content]")?;
    let title = selector("title")?;

    let mut tags = HashMap::new();
    for element in document.select(&meta) {
        let attrs = element.value();
        let Some(key) = attrs.attr("property").or_else(|| attrs.attr("name")) else {
            continue;
        };
        let content = attrs.attr("content").unwrap_or_default();
        tags.entry(key.trim().to_ascii_lowercase())
            .or_insert_with(|| content.to_string());
    }

    if let Some(element) = document.select(&title).next() {
        let text: String = element.text().collect();
        tags.entry(DOCUMENT_TITLE.to_string()).or_insert(text);
    }

    Ok(tags)
}

/// Map tag pairs onto the common result shape.
pub fn metadata_from_tags(tags: &HashMap<String, String>) -> MetadataResult {
    let first = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| tags.get(*k))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    };

    MetadataResult {
        thumbnail_url: first(THUMBNAIL_KEYS),
        title: first(TITLE_KEYS),
        description: first(DESCRIPTION_KEYS),
        author_name: first(AUTHOR_KEYS),
    }
    .normalized()
}

/// OpenGraph fetcher.
pub struct OpenGraphFetcher {
    tags: Arc<dyn TagReader>,
}

impl OpenGraphFetcher {
    pub fn new(tags: Arc<dyn TagReader>) -> Self {
        Self { tags }
    }

    /// Fetcher reading tags from pages served by `pages`.
    pub fn from_pages(pages: Arc<dyn PageSource>) -> Self {
        Self::new(Arc::new(HtmlTagReader::new(pages)))
    }
}

#[async_trait]
impl MetadataFetcher for OpenGraphFetcher {
    fn name(&self) -> &'static str {
        "opengraph"
    }

    async fn fetch(&self, url: &str, _provider: &ProviderDefinition) -> Result<MetadataResult> {
        let tags = self.tags.read_tags(url).await?;
        tracing::debug!(url, count = tags.len(), "read page tags");
        Ok(metadata_from_tags(&tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmeta_common::{Error, ProviderMethod};

    const IMDB_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Moon (2009) - IMDb</title>
  <meta property="og:title" content="Moon (2009)" />
  <meta property="og:image" content="https://m.media-amazon.com/images/moon.jpg" />
  <meta name="description" content="Directed by Duncan Jones." />
  <meta property="og:description" content="  " />
  <meta name="viewport" content="width=device-width" />
  <meta charset="utf-8" />
</head>
<body></body>
</html>"#;

    struct StubPages(&'static str);

    #[async_trait]
    impl PageSource for StubPages {
        async fn fetch_page(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingReader;

    #[async_trait]
    impl TagReader for FailingReader {
        async fn read_tags(&self, url: &str) -> Result<HashMap<String, String>> {
            Err(Error::not_found(url))
        }
    }

    fn provider() -> ProviderDefinition {
        ProviderDefinition {
            name: "IMDb".to_string(),
            url_patterns: Vec::new(),
            method: ProviderMethod::OpenGraph,
            endpoint: None,
        }
    }

    #[test]
    fn test_extract_tags() {
        let tags = extract_tags(IMDB_PAGE).unwrap();
        assert_eq!(tags.get("og:title").map(String::as_str), Some("Moon (2009)"));
        assert_eq!(
            tags.get("description").map(String::as_str),
            Some("Directed by Duncan Jones.")
        );
        assert_eq!(
            tags.get(DOCUMENT_TITLE).map(String::as_str),
            Some("Moon (2009) - IMDb")
        );
        assert!(tags.contains_key("viewport"));
        assert!(!tags.contains_key("charset"));
    }

    #[test]
    fn test_extract_tags_first_occurrence_wins() {
        let html = r#"<meta property="OG:Title" content="first"><meta property="og:title" content="second">"#;
        let tags = extract_tags(html).unwrap();
        assert_eq!(tags.get("og:title").map(String::as_str), Some("first"));
    }

    #[test]
    fn test_metadata_from_tags_fallbacks() {
        let result = metadata_from_tags(&extract_tags(IMDB_PAGE).unwrap());
        assert_eq!(result.title.as_deref(), Some("Moon (2009)"));
        assert_eq!(
            result.thumbnail_url.as_deref(),
            Some("https://m.media-amazon.com/images/moon.jpg")
        );
        // Blank og:description falls through to the plain description tag.
        assert_eq!(result.description.as_deref(), Some("Directed by Duncan Jones."));
        assert_eq!(result.author_name, None);
    }

    #[test]
    fn test_metadata_from_document_title_only() {
        let tags = extract_tags("<html><head><title> Plain </title></head></html>").unwrap();
        let result = metadata_from_tags(&tags);
        assert_eq!(result.title.as_deref(), Some("Plain"));
        assert!(result.thumbnail_url.is_none());
        assert!(result.description.is_none());
    }

    #[tokio::test]
    async fn test_fetch_through_page_source() {
        let fetcher = OpenGraphFetcher::from_pages(Arc::new(StubPages(IMDB_PAGE)));
        let result = fetcher
            .fetch("http://www.imdb.com/title/tt1182345/", &provider())
            .await
            .unwrap();
        assert_eq!(result.title.as_deref(), Some("Moon (2009)"));
    }

    #[tokio::test]
    async fn test_fetch_propagates_reader_error() {
        let fetcher = OpenGraphFetcher::new(Arc::new(FailingReader));
        let err = fetcher
            .fetch("http://www.imdb.com/title/tt0/", &provider())
            .await
            .unwrap_err();
        assert_eq!(err, Error::not_found("http://www.imdb.com/title/tt0/"));
    }
}
