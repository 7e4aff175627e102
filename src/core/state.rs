//! # Suggestion State
//!
//! ```text
//!            fetch ok (non-empty, current)
//!   Inactive ────────────────────────────▶ Active { suggestion }
//!      ▲                                        │
//!      └──── visible key / Tab accept ──────────┘
//! ```

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionState {
    #[default]
    Inactive,
    Active {
        suggestion: String,
    },
}

impl SuggestionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SuggestionState::Active { .. })
    }

    /// The ghost text currently on offer, if any.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            SuggestionState::Active { suggestion } => Some(suggestion),
            SuggestionState::Inactive => None,
        }
    }
}
