use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// URLs resolved when neither the command line nor the config file names any.
pub const DEFAULT_URLS: &[&str] = &[
    "https://www.goodreads.com/book/show/1141797",
    "http://www.imdb.com/title/tt1155076/",
    "https://www.youtube.com/watch?v=Ke1Y3P9D0Bc",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub http: HttpConfig,

    /// Batch resolved by `linkmeta resolve` when no URLs are given
    #[serde(default)]
    pub urls: Vec<String>,
}

impl Config {
    /// URLs for a batch run: the configured list, or the built-in one.
    pub fn batch_urls(&self) -> Vec<String> {
        if self.urls.is_empty() {
            DEFAULT_URLS.iter().map(|u| u.to_string()).collect()
        } else {
            self.urls.clone()
        }
    }
}

/// Provider catalog sources.
///
/// Each entry overrides the corresponding built-in catalog. Sources are always
/// merged in the order oEmbed, OpenGraph, scrape, regardless of which are
/// overridden.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TOML file with oEmbed providers
    #[serde(default)]
    pub oembed: Option<PathBuf>,

    /// TOML file with OpenGraph providers
    #[serde(default)]
    pub opengraph: Option<PathBuf>,

    /// TOML file with scrape providers
    #[serde(default)]
    pub scrape: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("linkmeta/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}
