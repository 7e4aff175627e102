//! # Suggestion Client
//!
//! The boundary the session talks to. Whatever the provider does (time out,
//! return 500, send garbage), the caller only ever sees a string, and an
//! empty one means "nothing to show".

use std::sync::Arc;

use log::{debug, warn};

use super::types::normalize_suggestion;
use super::{SuggestionProvider, SuggestionRequest};

#[derive(Clone)]
pub struct SuggestionClient {
    provider: Arc<dyn SuggestionProvider>,
}

impl SuggestionClient {
    pub fn new(provider: Arc<dyn SuggestionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch a suggestion for `prefix` under `context`. Never fails.
    pub async fn fetch(&self, context: &str, prefix: &str) -> String {
        let request = SuggestionRequest::new(context, prefix);
        match self.provider.suggest(&request).await {
            Ok(raw) => {
                let suggestion = normalize_suggestion(&raw);
                debug!(
                    "{} suggestion: {} bytes",
                    self.provider.name(),
                    suggestion.len()
                );
                suggestion
            }
            Err(e) => {
                warn!("Suggestion fetch failed ({}): {}", self.provider.name(), e);
                String::new()
            }
        }
    }
}
