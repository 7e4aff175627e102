//! HTTP provider for the local autocomplete service.
//!
//! The service exposes a single endpoint:
//!
//! ```text
//! POST {base_url}/autocomplete
//! {"subject": "...", "text_so_far": "..."}  →  {"suggestion": "..."}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::inference::types::{AutocompleteRequest, AutocompleteResponse};
use crate::inference::{ProviderError, SuggestionProvider, SuggestionRequest};

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AutocompleteProvider {
    base_url: String,
    client: reqwest::Client,
}

impl AutocompleteProvider {
    /// Build a provider for `base_url` (or `DEFAULT_SERVICE_URL`) with a per-request timeout.
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        info!(
            "Autocomplete provider: base_url={}, timeout={}ms",
            base_url,
            timeout.as_millis()
        );
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SuggestionProvider for AutocompleteProvider {
    fn name(&self) -> &str {
        "autocomplete"
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, ProviderError> {
        debug!(
            "POST /autocomplete: subject_len={}, prefix_len={}",
            request.context.len(),
            request.prefix.len()
        );

        let response = self
            .client
            .post(format!("{}/autocomplete", self.base_url))
            .json(&AutocompleteRequest::from(request))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Autocomplete service error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let body: AutocompleteResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(body.suggestion.unwrap_or_default())
    }
}
