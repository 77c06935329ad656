//! Provider definitions and the raw catalog records they are built from.

use linkmeta_common::{Error, ProviderMethod, Result};
use linkmeta_pattern::UrlPattern;
use reqwest::Url;
use serde::Deserialize;

/// Placeholder in an oEmbed endpoint template for the response format.
pub const FORMAT_PLACEHOLDER: &str = "{format}";

/// A single provider entry as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderRecord {
    pub name: String,

    #[serde(alias = "url_patterns", alias = "urlPatterns")]
    pub url_schemes: Vec<String>,

    /// Retrieval method; defaults to the kind of the source file.
    #[serde(default, alias = "method")]
    pub how: Option<ProviderMethod>,

    #[serde(default)]
    pub endpoint: Option<String>,
}

/// A validated provider with compiled URL patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDefinition {
    pub name: String,
    pub url_patterns: Vec<UrlPattern>,
    pub method: ProviderMethod,
    pub endpoint: Option<String>,
}

impl ProviderDefinition {
    /// Validate a record and compile its patterns.
    ///
    /// `default_method` applies when the record does not declare one.
    pub fn from_record(record: ProviderRecord, default_method: ProviderMethod) -> Result<Self> {
        let name = record.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::config("provider with an empty name"));
        }

        if record.url_schemes.is_empty() {
            return Err(Error::config(format!("provider '{name}' has no url_schemes")));
        }

        let url_patterns = record
            .url_schemes
            .iter()
            .map(|pattern| {
                UrlPattern::compile(pattern)
                    .map_err(|e| Error::config(format!("provider '{name}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let method = record.how.unwrap_or(default_method);

        let endpoint = record
            .endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        if method == ProviderMethod::Oembed {
            let Some(endpoint) = &endpoint else {
                return Err(Error::config(format!(
                    "oembed provider '{name}' has no endpoint"
                )));
            };
            endpoint_url(endpoint)
                .map_err(|e| Error::config(format!("provider '{name}': {e}")))?;
        }

        Ok(Self {
            name,
            url_patterns,
            method,
            endpoint,
        })
    }

    /// The first of this provider's patterns matching `url`, in declared order.
    pub fn matching_pattern(&self, url: &str) -> Option<&UrlPattern> {
        self.url_patterns.iter().find(|p| p.matches(url))
    }

    /// Whether any of this provider's patterns matches `url`.
    pub fn matches(&self, url: &str) -> bool {
        self.matching_pattern(url).is_some()
    }
}

/// Expand an endpoint template into a URL.
pub fn endpoint_url(template: &str) -> std::result::Result<Url, String> {
    let expanded = template.replace(FORMAT_PLACEHOLDER, "json");
    Url::parse(&expanded).map_err(|e| format!("invalid endpoint {template:?}: {e}"))
}
