//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::Session;
use crate::inference::{ProviderError, SuggestionProvider, SuggestionRequest};
use crate::surface::SurfaceHandles;
use crate::surface::memory::{MemoryField, MemoryOverlay, MemorySurface};

/// Provider that answers from a fixed script and records what it was asked.
/// Once the script runs out it answers with an empty suggestion.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<SuggestionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SuggestionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Provider that always fails with the error built by `make_error`.
pub struct FailingProvider {
    make_error: fn() -> ProviderError,
}

impl FailingProvider {
    pub fn new(make_error: fn() -> ProviderError) -> Self {
        Self { make_error }
    }
}

#[async_trait]
impl SuggestionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn suggest(&self, _request: &SuggestionRequest) -> Result<String, ProviderError> {
        Err((self.make_error)())
    }
}

/// Creates a session over fresh in-memory handles.
pub fn test_session(body: &str, subject: &str) -> Session<MemorySurface, MemoryField, MemoryOverlay> {
    Session::new(
        SurfaceHandles {
            body: MemorySurface::new(body),
            subject: MemoryField::new(subject),
        },
        MemoryOverlay::new(),
    )
}

/// Poll `condition` every 5ms for up to two seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..400 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
