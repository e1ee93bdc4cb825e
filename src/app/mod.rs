//! Pager state and the event loop that drives it.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete pager state
//! - [`Message`]: Everything producers can put on the event queue
//! - [`update`]: The single place state changes
//! - [`App::run`]: Terminal setup, producers and the dispatch loop
//!
//! Input, the ticker, signals and [`PagerHandle`]s all run on their own
//! threads and only ever send messages.

mod effects;
mod event_loop;
mod handle;
pub mod keymap;
mod model;
mod navigation;
mod producers;
pub mod prompt;
mod update;

pub use event_loop::dispatch_loop;
pub use handle::{HandleError, PagerHandle};
pub use model::{Active, LineSelection, Model, ScreenRow, SelectionState};
pub use prompt::{InputError, InputMode};
pub use update::{LoopControl, Message, update};

use crossbeam_channel::{Receiver, Sender};

use crate::document::Document;
use crate::ui::style::Theme;

/// Messages that can wait in the queue before producers block.
pub const QUEUE_CAPACITY: usize = 1024;

/// Owns the event queue and the documents until [`App::run`] takes over.
pub struct App {
    docs: Vec<Document>,
    theme: Theme,
    case_sensitive: bool,
    quit_if_one_screen: bool,
    exit_write: bool,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl App {
    /// Create a pager over `docs`; the first one is shown.
    pub fn new(docs: Vec<Document>) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(QUEUE_CAPACITY);
        Self {
            docs,
            theme: Theme::default(),
            case_sensitive: false,
            quit_if_one_screen: false,
            exit_write: false,
            tx,
            rx,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Match searches case-sensitively.
    #[must_use]
    pub const fn with_case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Print the document and exit instead of paging when it fits on one screen.
    #[must_use]
    pub const fn with_quit_if_one_screen(mut self, enabled: bool) -> Self {
        self.quit_if_one_screen = enabled;
        self
    }

    /// Always print the last screen after quitting.
    #[must_use]
    pub const fn with_exit_write(mut self, enabled: bool) -> Self {
        self.exit_write = enabled;
        self
    }

    /// A handle that controls this pager once it runs.
    pub fn handle(&self) -> PagerHandle {
        PagerHandle::new(self.tx.clone())
    }
}

#[cfg(test)]
mod tests;
