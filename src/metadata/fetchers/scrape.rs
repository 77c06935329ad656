//! HTML scrape fetcher.
//!
//! Sites without structured metadata need a hand-written recipe keyed by
//! provider name. Providers without a recipe fail with
//! [`Error::UnsupportedScrapeProvider`] before any request is made.

use std::sync::Arc;

use async_trait::async_trait;
use linkmeta_common::{Error, MetadataResult, Result};
use scraper::{Html, Selector};

use super::selector;
use crate::catalog::ProviderDefinition;
use crate::metadata::fetcher::MetadataFetcher;
use crate::metadata::http::PageSource;

/// Extraction recipes, one per supported provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    GoodReads,
}

impl Recipe {
    /// Recipe for a provider name, matched case-insensitively.
    pub fn for_provider(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("goodreads") {
            Some(Self::GoodReads)
        } else {
            None
        }
    }

    pub fn extract(self, html: &str) -> Result<MetadataResult> {
        match self {
            Self::GoodReads => scrape_goodreads(html),
        }
    }
}

fn scrape_goodreads(html: &str) -> Result<MetadataResult> {
    let document = Html::parse_document(html);
    let cover = selector("#coverImage")?;
    let title = selector("#bookTitle")?;
    let description = selector(r#"[id^="freeTextContainer"]"#)?;
    let authors = selector("#bookAuthors > span:nth-of-type(2) > a > span")?;

    let text_of = |sel: &Selector| {
        document
            .select(sel)
            .next()
            .map(|el| el.text().collect::<String>())
    };

    let author_names: Vec<String> = document
        .select(&authors)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    Ok(MetadataResult {
        thumbnail_url: document
            .select(&cover)
            .next()
            .and_then(|el| el.value().attr("src"))
            .map(str::to_string),
        title: text_of(&title),
        description: text_of(&description),
        author_name: (!author_names.is_empty()).then(|| author_names.join(",")),
    }
    .normalized())
}

/// Scrape fetcher.
pub struct ScrapeFetcher {
    pages: Arc<dyn PageSource>,
}

impl ScrapeFetcher {
    pub fn new(pages: Arc<dyn PageSource>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl MetadataFetcher for ScrapeFetcher {
    fn name(&self) -> &'static str {
        "scrape"
    }

    async fn fetch(&self, url: &str, provider: &ProviderDefinition) -> Result<MetadataResult> {
        let recipe = Recipe::for_provider(&provider.name)
            .ok_or_else(|| Error::UnsupportedScrapeProvider(provider.name.clone()))?;
        tracing::debug!(url, ?recipe, "scraping page");
        let html = self.pages.fetch_page(url).await?;
        recipe.extract(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmeta_common::ProviderMethod;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const GOODREADS_PAGE: &str = r#"<html><body>
<div id="imagecol">
  <img id="coverImage" alt="Dune" src="https://images.gr-assets.com/books/dune.jpg">
</div>
<h1 id="bookTitle" class="gr-h1 gr-h1--serif">
      Dune
</h1>
<div id="bookAuthors" class="">
  <span class="by">by</span>
  <span itemprop="author">
    <a class="authorName" href="/author/show/58.Frank_Herbert"><span itemprop="name">Frank Herbert</span></a>,
    <a class="authorName" href="/author/show/1.Someone_Else"><span itemprop="name">Someone Else</span></a>
  </span>
</div>
<div id="description">
  <span id="freeTextContainer123">Set on the desert planet Arrakis.</span>
  <span id="freeText123" style="display:none">Set on the desert planet Arrakis, in full.</span>
</div>
</body></html>"#;

    struct CountingPages {
        body: &'static str,
        calls: AtomicUsize,
    }

    impl CountingPages {
        fn new(body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                body,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PageSource for CountingPages {
        async fn fetch_page(&self, _url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.to_string())
        }
    }

    fn provider(name: &str) -> ProviderDefinition {
        ProviderDefinition {
            name: name.to_string(),
            url_patterns: Vec::new(),
            method: ProviderMethod::Scrape,
            endpoint: None,
        }
    }

    #[test]
    fn test_recipe_lookup() {
        assert_eq!(Recipe::for_provider("GoodReads"), Some(Recipe::GoodReads));
        assert_eq!(Recipe::for_provider("goodreads"), Some(Recipe::GoodReads));
        assert_eq!(Recipe::for_provider("LibraryThing"), None);
    }

    #[test]
    fn test_goodreads_recipe() {
        let result = Recipe::GoodReads.extract(GOODREADS_PAGE).unwrap();
        assert_eq!(
            result.thumbnail_url.as_deref(),
            Some("https://images.gr-assets.com/books/dune.jpg")
        );
        assert_eq!(result.title.as_deref(), Some("Dune"));
        assert_eq!(
            result.description.as_deref(),
            Some("Set on the desert planet Arrakis.")
        );
        assert_eq!(result.author_name.as_deref(), Some("Frank Herbert,Someone Else"));
    }

    #[test]
    fn test_goodreads_recipe_missing_elements() {
        let result = Recipe::GoodReads
            .extract("<html><body><h1 id=\"bookTitle\">Only a title</h1></body></html>")
            .unwrap();
        assert_eq!(result.title.as_deref(), Some("Only a title"));
        assert_eq!(result.thumbnail_url, None);
        assert_eq!(result.description, None);
        assert_eq!(result.author_name, None);
    }

    #[test]
    fn test_goodreads_authors_read_from_second_span_only() {
        let html = r#"<div id="bookAuthors">
  <span>by</span>
  <span><a href="/author/1"><span>Larry Niven</span></a></span>
  <span><a href="/author/2"><span>Jerry Pournelle</span></a></span>
</div>"#;
        let result = Recipe::GoodReads.extract(html).unwrap();
        assert_eq!(result.author_name.as_deref(), Some("Larry Niven"));
    }

    #[tokio::test]
    async fn test_fetch_goodreads() {
        let pages = CountingPages::new(GOODREADS_PAGE);
        let fetcher = ScrapeFetcher::new(pages.clone());
        let result = fetcher
            .fetch("https://www.goodreads.com/book/show/234225", &provider("GoodReads"))
            .await
            .unwrap();
        assert_eq!(result.title.as_deref(), Some("Dune"));
        assert_eq!(pages.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_provider_makes_no_request() {
        let pages = CountingPages::new(GOODREADS_PAGE);
        let fetcher = ScrapeFetcher::new(pages.clone());
        let err = fetcher
            .fetch("https://www.librarything.com/work/1", &provider("LibraryThing"))
            .await
            .unwrap_err();
        assert_eq!(err, Error::UnsupportedScrapeProvider("LibraryThing".to_string()));
        assert_eq!(pages.calls.load(Ordering::SeqCst), 0);
    }
}
