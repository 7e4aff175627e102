//! # Core Session Logic
//!
//! This module contains the ghost-text state machine.
//! It knows nothing about terminals, browsers, or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Headless  │      │  Browser   │
//!     │    Host    │      │   Driver   │      │   Host     │
//!     │ (ratatui)  │      │  (tokio)   │      │  (future)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`]: The per-surface `Session`: tracked text, suggestion state, overlay
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`tracker`]: Key-driven copy of the typed text
//! - [`config`]: Settings with defaults → file → env → CLI resolution

pub mod action;
pub mod config;
pub mod key;
pub mod session;
pub mod state;
pub mod tracker;

pub use action::{Action, Effect, FetchRequest, update};
pub use key::Key;
pub use session::Session;
pub use state::SuggestionState;
