mod types;

pub use types::*;

use anyhow::{Context, Result};
use reqwest::Url;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./linkmeta.toml",
        "~/.config/linkmeta/config.toml",
        "/etc/linkmeta/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.http.user_agent.trim().is_empty() {
        anyhow::bail!("http.user_agent cannot be empty");
    }

    for url in &config.urls {
        Url::parse(url).with_context(|| format!("Invalid URL in urls: {url}"))?;
    }

    for path in [
        &config.catalog.oembed,
        &config.catalog.opengraph,
        &config.catalog.scrape,
    ]
    .into_iter()
    .flatten()
    {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        if !Path::new(&expanded).exists() {
            anyhow::bail!("Catalog file does not exist: {:?}", path);
        }
    }

    Ok(())
}
