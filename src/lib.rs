// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. document::DocumentError)
    clippy::module_name_repetitions
)]

//! # tailview
//!
//! A terminal pager for logs and tabular text.
//!
//! tailview shows files or standard input while they are still being read,
//! with:
//! - Line wrapping or horizontal scrolling
//! - Fixed header lines and a column mode for delimited data
//! - Literal search, marks and a goto prompt
//! - Follow mode for growing files
//!
//! ## Architecture
//!
//! tailview uses The Elm Architecture (TEA) pattern:
//! - **Model**: Pager state
//! - **Message**: Events from input, timers, signals and embedders
//! - **Update**: The single consumer of the event queue
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Event loop, pager state and navigation
//! - [`config`]: Saved defaults
//! - [`document`]: Line storage and background readers
//! - [`search`]: Search functionality
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File growth notification for follow mode

pub mod app;
pub mod config;
pub mod document;
pub mod search;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, PagerHandle};
    pub use crate::document::Document;
    pub use crate::ui::viewport::Viewport;
}
