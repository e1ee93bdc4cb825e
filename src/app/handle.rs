//! Programmatic control of a running pager.

use crossbeam_channel::Sender;
use thiserror::Error;

use crate::app::Message;
use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandleError {
    /// The pager has stopped and no longer accepts commands.
    #[error("pager is no longer running")]
    Disconnected,
}

/// Sends commands to a pager from any thread.
///
/// Each call blocks until the command is queued, not until it is applied.
/// Commands are applied in the order they were queued.
///
/// # Example
///
/// ```no_run
/// use tailview::app::App;
/// use tailview::document::Document;
///
/// let app = App::new(vec![Document::from_text("notes", "one\ntwo\nthree")]);
/// let handle = app.handle();
/// std::thread::spawn(move || {
///     let _ = handle.search("two");
/// });
/// app.run().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PagerHandle {
    tx: Sender<Message>,
}

impl PagerHandle {
    pub(crate) const fn new(tx: Sender<Message>) -> Self {
        Self { tx }
    }

    fn send(&self, msg: Message) -> Result<(), HandleError> {
        self.tx.send(msg).map_err(|_| HandleError::Disconnected)
    }

    /// Quit the pager.
    ///
    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn quit(&self) -> Result<(), HandleError> {
        self.send(Message::Quit { after_write: false })
    }

    /// Quit and print the last screen to stdout.
    ///
    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn quit_after_write(&self) -> Result<(), HandleError> {
        self.send(Message::Quit { after_write: true })
    }

    /// Go to 1-based line `line`.
    ///
    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn jump_to_line(&self, line: usize) -> Result<(), HandleError> {
        self.send(Message::Goto(line.to_string()))
    }

    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn jump_to_top(&self) -> Result<(), HandleError> {
        self.send(Message::JumpTop)
    }

    /// Go to the end of what has been read so far.
    ///
    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn jump_to_bottom(&self) -> Result<(), HandleError> {
        self.send(Message::JumpBottom)
    }

    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn search(&self, text: &str) -> Result<(), HandleError> {
        self.send(Message::Search(text.to_string()))
    }

    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn back_search(&self, text: &str) -> Result<(), HandleError> {
        self.send(Message::BackSearch(text.to_string()))
    }

    /// Open `doc` in the pager and show it.
    ///
    /// # Errors
    /// Returns [`HandleError::Disconnected`] if the pager has stopped.
    pub fn switch_document(&self, doc: Document) -> Result<(), HandleError> {
        self.send(Message::SwitchDocument(Box::new(doc)))
    }
}
