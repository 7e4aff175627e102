pub mod client;
pub mod provider;
pub mod providers;
pub mod types;

pub use client::SuggestionClient;
pub use provider::{ProviderError, SuggestionProvider};
pub use providers::AutocompleteProvider;
pub use types::SuggestionRequest;
