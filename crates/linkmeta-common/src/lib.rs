//! Linkmeta-Common: Shared types and error handling.
//!
//! This crate provides the pieces shared by the resolver, the fetchers, and
//! the command-line front end:
//!
//! - **Provider methods**: The closed set of retrieval strategies a catalog
//!   entry can declare
//! - **Metadata results**: The normalized output every strategy produces
//! - **Error Handling**: The error taxonomy and result alias
//!
//! # Examples
//!
//! ```
//! use linkmeta_common::{Error, MetadataResult, ProviderMethod, Result};
//!
//! let method = ProviderMethod::from("oembed");
//! assert_eq!(method, ProviderMethod::Oembed);
//!
//! let result = MetadataResult {
//!     title: Some("Lore".to_string()),
//!     ..Default::default()
//! };
//! assert!(result.thumbnail_url.is_none());
//!
//! fn example() -> Result<MetadataResult> {
//!     Err(Error::no_provider_found("https://example.com/"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
