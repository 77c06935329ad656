//! Batch resolution and reporting.
//!
//! URLs are processed one at a time. A failure for one URL is recorded in its
//! report and never stops the batch.

use std::io::{self, Write};

use linkmeta_common::{Error, MetadataResult};
use serde::Serialize;

use crate::metadata::Dispatcher;

/// Line printed when no provider matches.
pub const NO_PROVIDER: &str = "No provider found.";

/// What happened to a single URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Resolution only; nothing was fetched.
    Resolved,
    Fetched(MetadataResult),
    Failed(Error),
}

/// Result of processing one URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlReport {
    pub url: String,
    /// Name of the matched provider.
    pub provider: Option<String>,
    pub outcome: Outcome,
}

impl UrlReport {
    /// Human-readable block: the URL, then indented provider and fields.
    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.url)?;
        match &self.provider {
            Some(name) => writeln!(out, "  provider: {name}")?,
            None => writeln!(out, "  {NO_PROVIDER}")?,
        }

        match &self.outcome {
            Outcome::Resolved => {}
            Outcome::Fetched(metadata) if metadata.is_empty() => {
                writeln!(out, "  (no metadata extracted)")?;
            }
            Outcome::Fetched(metadata) => {
                for (label, value) in metadata.fields() {
                    writeln!(out, "  {label}: {value}")?;
                }
            }
            // Already reported by the provider line.
            Outcome::Failed(Error::NoProviderFound(_)) => {}
            Outcome::Failed(err) => writeln!(out, "  error: {err}")?,
        }
        Ok(())
    }

    /// One JSON object on a single line.
    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            url: &'a str,
            provider: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            metadata: Option<&'a MetadataResult>,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<String>,
        }

        let (metadata, error) = match &self.outcome {
            Outcome::Resolved => (None, None),
            Outcome::Fetched(metadata) => (Some(metadata), None),
            Outcome::Failed(err) => (None, Some(err.to_string())),
        };

        let report = JsonReport {
            url: &self.url,
            provider: self.provider.as_deref(),
            metadata,
            error,
        };
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)
    }
}

/// Resolve one URL and, unless `dry_run`, fetch its metadata.
pub async fn process_url(dispatcher: &Dispatcher, url: &str, dry_run: bool) -> UrlReport {
    let Some(provider) = dispatcher.find(url) else {
        tracing::warn!(url, "no provider found");
        return UrlReport {
            url: url.to_string(),
            provider: None,
            outcome: Outcome::Failed(Error::no_provider_found(url)),
        };
    };

    let outcome = if dry_run {
        Outcome::Resolved
    } else {
        match dispatcher.dispatch(url, provider).await {
            Ok(metadata) => Outcome::Fetched(metadata),
            Err(err) if err.is_remote() => {
                tracing::warn!(url, provider = %provider.name, error = %err, "fetch failed");
                Outcome::Failed(err)
            }
            Err(err) => {
                tracing::error!(url, provider = %provider.name, error = %err, "provider unusable");
                Outcome::Failed(err)
            }
        }
    };

    UrlReport {
        url: url.to_string(),
        provider: Some(provider.name.clone()),
        outcome,
    }
}

/// Process every URL in order.
pub async fn process_batch(
    dispatcher: &Dispatcher,
    urls: &[String],
    dry_run: bool,
) -> Vec<UrlReport> {
    tracing::info!(count = urls.len(), dry_run, "processing batch");
    let mut reports = Vec::with_capacity(urls.len());
    for url in urls {
        reports.push(process_url(dispatcher, url, dry_run).await);
    }
    reports
}
