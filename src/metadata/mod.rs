//! Metadata retrieval for resolved URLs.
//!
//! A [`Dispatcher`] resolves a URL against the provider catalog and hands it
//! to one of three [`MetadataFetcher`] strategies, each producing a
//! [`MetadataResult`](linkmeta_common::MetadataResult).
//!
//! # Module layout
//!
//! - [`fetcher`] -- Trait shared by every strategy.
//! - [`fetchers`] -- oEmbed, OpenGraph, and scrape implementations.
//! - [`dispatcher`] -- Method-based routing.
//! - [`http`] -- HTTP clients and the page-fetch capability.

pub mod dispatcher;
pub mod fetcher;
pub mod fetchers;
pub mod http;

pub use dispatcher::Dispatcher;
pub use fetcher::MetadataFetcher;
pub use http::{HttpPageSource, PageSource};
