//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Screen geometry and wrap arithmetic
//! - [`style`]: Theming and colors
//! - [`render`]: Drawing the model into a ratatui frame

pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::render;
