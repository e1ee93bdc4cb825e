//! Input modes and the one-line prompt editor.

use thiserror::Error;

/// Which interaction mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Help,
    Search,
    BackSearch,
    Goto,
    SetHeader,
    SetDelimiter,
    SetTabWidth,
}

impl InputMode {
    /// Whether keys go to the line editor instead of the key bindings.
    pub const fn is_prompt(self) -> bool {
        !matches!(self, Self::Normal | Self::Help)
    }

    /// Text shown before the edited line.
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Normal | Self::Help => "",
            Self::Search => "/",
            Self::BackSearch => "?",
            Self::Goto => "Goto line:",
            Self::SetHeader => "Header length:",
            Self::SetDelimiter => "Delimiter:",
            Self::SetTabWidth => "TAB width:",
        }
    }
}

/// Rejected prompt input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid number")]
    InvalidNumber,
    #[error("out of range")]
    OutOfRange,
}

/// Parse a prompt answer as a signed integer, ignoring surrounding spaces.
///
/// # Errors
/// Returns [`InputError::InvalidNumber`] when `input` is not an integer.
pub fn parse_number(input: &str) -> Result<i64, InputError> {
    input.trim().parse().map_err(|_| InputError::InvalidNumber)
}

/// Previously entered answers for one prompt kind, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    list: Vec<String>,
    pos: usize,
}

impl Candidates {
    /// Move `entry` to the end, dropping any earlier copy, and reset recall.
    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        if entry.is_empty() {
            return;
        }
        self.list.retain(|e| *e != entry);
        self.list.push(entry);
        self.pos = self.list.len();
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.list
    }

    /// Step back to an older entry.
    pub fn older(&mut self) -> Option<&str> {
        if self.list.is_empty() {
            return None;
        }
        self.pos = self.pos.saturating_sub(1);
        self.list.get(self.pos).map(String::as_str)
    }

    /// Step forward to a newer entry, stopping at the most recent one.
    pub fn newer(&mut self) -> Option<&str> {
        if self.list.is_empty() {
            return None;
        }
        self.pos = (self.pos + 1).min(self.list.len() - 1);
        self.list.get(self.pos).map(String::as_str)
    }

    /// Forget the recall position so the next `older` starts from the newest.
    pub fn reset_recall(&mut self) {
        self.pos = self.list.len();
    }
}

/// Single-line text editor used by the prompts. `cursor` counts chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
}

impl LineEditor {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor.
    pub fn cursor_col(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor)
            .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0))
            .sum()
    }

    /// Replace the whole line and put the cursor at its end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the line out, leaving the editor empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.text.remove(at);
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_at(self.cursor);
            self.text.remove(at);
        }
    }

    pub const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }
}

/// Input state: the active mode, the line being edited and per-prompt history.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub mode: InputMode,
    pub editor: LineEditor,
    pub search_candidates: Candidates,
    pub goto_candidates: Candidates,
    pub header_candidates: Candidates,
    pub delimiter_candidates: Candidates,
    pub tab_width_candidates: Candidates,
}

impl Input {
    /// History used by `mode`'s prompt. Both search directions share one.
    pub fn candidates_mut(&mut self, mode: InputMode) -> Option<&mut Candidates> {
        match mode {
            InputMode::Normal | InputMode::Help => None,
            InputMode::Search | InputMode::BackSearch => Some(&mut self.search_candidates),
            InputMode::Goto => Some(&mut self.goto_candidates),
            InputMode::SetHeader => Some(&mut self.header_candidates),
            InputMode::SetDelimiter => Some(&mut self.delimiter_candidates),
            InputMode::SetTabWidth => Some(&mut self.tab_width_candidates),
        }
    }

    /// Open the prompt for `mode` with an empty line.
    pub fn open(&mut self, mode: InputMode) {
        self.mode = mode;
        self.editor.clear();
        if let Some(c) = self.candidates_mut(mode) {
            c.reset_recall();
        }
    }

    /// Replace the edited line with an older history entry.
    pub fn recall_older(&mut self) {
        let mode = self.mode;
        if let Some(entry) = self.candidates_mut(mode).and_then(|c| c.older().map(str::to_string)) {
            self.editor.set(&entry);
        }
    }

    /// Replace the edited line with a newer history entry.
    pub fn recall_newer(&mut self) {
        let mode = self.mode;
        if let Some(entry) = self.candidates_mut(mode).and_then(|c| c.newer().map(str::to_string)) {
            self.editor.set(&entry);
        }
    }

    /// Finish the prompt: record the answer and return to `Normal`.
    ///
    /// Returns the submitted mode and text, or `None` outside a prompt.
    pub fn submit(&mut self) -> Option<(InputMode, String)> {
        let mode = self.mode;
        if !mode.is_prompt() {
            return None;
        }
        let text = self.editor.take();
        if let Some(c) = self.candidates_mut(mode) {
            c.push(text.clone());
        }
        self.mode = InputMode::Normal;
        Some((mode, text))
    }

    /// Abandon the prompt without submitting.
    pub fn cancel(&mut self) {
        self.editor.clear();
        self.mode = InputMode::Normal;
    }
}
