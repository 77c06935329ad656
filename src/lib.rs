//! Linkmeta - URL metadata resolution
//!
//! Resolves a URL to a provider from an ordered catalog and fetches its
//! metadata through oEmbed, OpenGraph tags, or a scrape recipe. The library
//! crate exposes the core functionality for integration testing.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod metadata;
