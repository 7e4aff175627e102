use std::fmt;

use async_trait::async_trait;

use super::types::SuggestionRequest;

/// Errors that can occur while talking to a suggestion backend.
///
/// These never cross [`SuggestionClient`](super::SuggestionClient); they exist
/// so providers can report what went wrong and the client can log it.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (bad URL, client could not be built).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expect.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Fetch one suggestion. `Ok("")` means the backend had nothing to offer.
    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, ProviderError>;
}
