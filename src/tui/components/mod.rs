//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar showing the subject and session status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Composer`: The editable text area, with ghost text as a prop
//!
//! ### Session Boundary
//!
//! - `GhostOverlay`: The overlay slot the session writes into
//!
//! Components receive external data as props (struct fields), never by
//! reaching into the session. The event loop copies what each component
//! needs right before drawing.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── ghost.rs         (Overlay slot)
//! └── composer/        (Editable text with ghost text)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod composer;
pub mod ghost;
pub use composer::{Composer, ComposerEvent};
pub use ghost::GhostOverlay;
