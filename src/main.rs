mod cli;

use linkmeta::{
    batch,
    catalog::{CatalogSources, ProviderCatalog},
    config::{self, Config},
    metadata::Dispatcher,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use linkmeta_common::ProviderMethod;
use std::io::Write;
use std::sync::Arc;

/// Assemble the provider catalog. Any malformed entry is fatal.
fn build_catalog(config: &Config) -> Result<ProviderCatalog> {
    let sources = CatalogSources::from_config(&config.catalog)?;
    let catalog =
        ProviderCatalog::assemble(&sources).context("Failed to assemble provider catalog")?;
    tracing::debug!("Catalog assembled with {} providers", catalog.len());
    Ok(catalog)
}

async fn run_batch(
    dispatcher: Dispatcher,
    urls: Vec<String>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for url in &urls {
        let report = batch::process_url(&dispatcher, url, dry_run).await;
        if json {
            report.write_json(&mut out)?;
        } else {
            report.write_text(&mut out)?;
        }
        out.flush()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "linkmeta=debug,reqwest=debug".to_string()
        } else {
            "linkmeta=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            urls,
            dry_run,
            json,
        } => resolve(cli.config.as_deref(), urls, dry_run, json),
        Commands::Providers => list_providers(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("linkmeta {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn resolve(
    config_path: Option<&std::path::Path>,
    urls: Vec<String>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = Arc::new(build_catalog(&config)?);
    let dispatcher = Dispatcher::from_config(catalog, &config.http)?;

    let urls = if urls.is_empty() {
        config.batch_urls()
    } else {
        urls
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_batch(dispatcher, urls, dry_run, json))
}

fn list_providers(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = build_catalog(&config)?;

    for (i, provider) in catalog.iter().enumerate() {
        println!("{}. {} ({})", i + 1, provider.name, provider.method);
        if let Some(ref endpoint) = provider.endpoint {
            println!("     endpoint: {}", endpoint);
        }
        for pattern in &provider.url_patterns {
            println!("     {}", pattern);
        }
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    let catalog = build_catalog(&config)?;

    println!("✓ Configuration is valid");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Providers: {}", catalog.len());
    for (label, method) in [
        ("oEmbed", ProviderMethod::Oembed),
        ("OpenGraph", ProviderMethod::OpenGraph),
        ("Scrape", ProviderMethod::Scrape),
    ] {
        let count = catalog.iter().filter(|p| p.method == method).count();
        println!("    {}: {}", label, count);
    }
    let unrecognized: Vec<_> = catalog
        .iter()
        .filter(|p| matches!(p.method, ProviderMethod::Unrecognized(_)))
        .map(|p| format!("{} ({})", p.name, p.method))
        .collect();
    if !unrecognized.is_empty() {
        println!("  Unsupported methods: {}", unrecognized.join(", "));
    }
    println!("  Default URLs: {}", config.batch_urls().len());

    Ok(())
}
