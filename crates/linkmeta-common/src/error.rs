//! Error taxonomy shared by every linkmeta component.
//!
//! Resolution, fetching, and catalog assembly all report failures through the
//! single [`Error`] enum below. Transport and payload faults are normalized
//! into [`Error::UnknownResponse`] and [`Error::MalformedPayload`] at the HTTP
//! boundary; anything else travels as its own variant.

/// Common error type for linkmeta.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A catalog entry or configuration value is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No provider in the catalog matches the URL.
    #[error("No provider found for {0}")]
    NoProviderFound(String),

    /// The provider declares a retrieval method with no implementation.
    #[error("Unsupported provider method: {0}")]
    UnsupportedProviderMethod(String),

    /// The endpoint does not support the requested response format (HTTP 501).
    #[error("Unknown format")]
    UnknownFormat,

    /// The endpoint has no data for the URL (HTTP 404). Carries the URL the
    /// caller supplied, not the final redirected location.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other terminal response, or a transport fault. Carries the last
    /// HTTP status code, or `Error` when no response was received.
    #[error("Unknown response: {0}")]
    UnknownResponse(String),

    /// A successful response whose body could not be parsed.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The scrape strategy has no recipe for this provider.
    #[error("Unsupported scrape provider: {0}")]
    UnsupportedScrapeProvider(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new NoProviderFound error.
    pub fn no_provider_found<S: Into<String>>(url: S) -> Self {
        Self::NoProviderFound(url.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(url: S) -> Self {
        Self::NotFound(url.into())
    }

    /// Create a new UnknownResponse error.
    pub fn unknown_response<S: Into<String>>(reason: S) -> Self {
        Self::UnknownResponse(reason.into())
    }

    /// Create a new MalformedPayload error.
    pub fn malformed_payload<S: Into<String>>(msg: S) -> Self {
        Self::MalformedPayload(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error came from talking to a remote server rather than
    /// from resolution or configuration.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::UnknownFormat
                | Self::NotFound(_)
                | Self::UnknownResponse(_)
                | Self::MalformedPayload(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed_payload(err.to_string())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
