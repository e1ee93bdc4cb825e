use std::ops::RangeInclusive;

use crossbeam_channel::Sender;

use crate::document::Document;
use crate::search::Matcher;
use crate::ui::style::Theme;
use crate::ui::viewport::{self, Viewport};

use super::keymap::help_lines;
use super::producers;
use super::prompt::{Input, InputMode};
use super::Message;

/// Which document the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Active {
    /// The current entry of [`Model::docs`].
    Document,
    /// The synthesized key binding list.
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Dragging,
    Finalized,
}

/// Buffer lines picked with the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    pub anchor: usize,
    pub active: usize,
    pub state: SelectionState,
}

impl LineSelection {
    pub fn lines(&self) -> RangeInclusive<usize> {
        self.anchor.min(self.active)..=self.anchor.max(self.active)
    }

    pub fn contains(&self, line: usize) -> bool {
        self.lines().contains(&line)
    }
}

/// One content row of the screen: which buffer line it shows, and which
/// wrapped piece of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRow {
    pub line: usize,
    pub branch: usize,
    pub is_header: bool,
}

/// The complete pager state.
///
/// Only the dispatch loop holds this; producers talk to it through
/// [`Message`](super::Message)s.
#[derive(Debug)]
pub struct Model {
    /// Screen geometry shared by every document
    pub viewport: Viewport,
    /// Every open document, never empty
    pub docs: Vec<Document>,
    /// Index into `docs` of the document shown outside help
    pub current: usize,
    /// Key binding list shown in help mode
    pub help: Document,
    pub active: Active,
    /// Mode, prompt line and prompt history
    pub input: Input,
    /// One-line status message, cleared on the next key
    pub message: String,
    pub theme: Theme,
    pub case_sensitive: bool,
    /// Print the screen after the terminal is restored
    pub after_write: bool,
    pub selection: Option<LineSelection>,
    /// Repeat count typed before a movement key
    pub pending_count: Option<usize>,
    pub last_search: Option<Matcher>,
    /// Text waiting to be sent to the clipboard after the next update
    pub clipboard: Option<String>,
    /// Repaint every cell on the next draw
    pub full_redraw: bool,
    /// Queue that tickers for documents opened later send to
    pub ticks: Option<Sender<Message>>,
}

impl Model {
    /// Create the state for `docs` on a terminal of `size` (width, height).
    pub fn new(mut docs: Vec<Document>, size: (u16, u16)) -> Self {
        if docs.is_empty() {
            docs.push(Document::from_lines("(empty)", Vec::<String>::new()));
        }
        let mut help = Document::from_lines("Help", help_lines());
        help.settings.wrap = false;
        let mut model = Self {
            viewport: Viewport::new(size.0, size.1),
            docs,
            current: 0,
            help,
            active: Active::Document,
            input: Input::default(),
            message: String::new(),
            theme: Theme::default(),
            case_sensitive: false,
            after_write: false,
            selection: None,
            pending_count: None,
            last_search: None,
            clipboard: None,
            full_redraw: false,
            ticks: None,
        };
        model.view_sync();
        model
    }

    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub const fn with_case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Start a ticker on `tx` for every still-growing document opened later.
    #[must_use]
    pub fn with_ticks(mut self, tx: Sender<Message>) -> Self {
        self.ticks = Some(tx);
        self
    }

    /// The document on screen.
    pub fn doc(&self) -> &Document {
        match self.active {
            Active::Help => &self.help,
            Active::Document => &self.docs[self.current],
        }
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        match self.active {
            Active::Help => &mut self.help,
            Active::Document => &mut self.docs[self.current],
        }
    }

    /// The viewport and the document on screen, borrowed together.
    pub(super) fn parts(&mut self) -> (&mut Viewport, &mut Document) {
        let doc = match self.active {
            Active::Help => &mut self.help,
            Active::Document => &mut self.docs[self.current],
        };
        (&mut self.viewport, doc)
    }

    pub fn mode(&self) -> InputMode {
        self.input.mode
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Recompute everything derived from the screen size and document.
    pub fn view_sync(&mut self) {
        self.prepare_start_x();
        self.set_wrap_header_len();
    }

    /// Terminal resized to `width` x `height`.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
        self.view_sync();
    }

    /// Reserve room for the line-number gutter.
    pub fn prepare_start_x(&mut self) {
        let (vp, doc) = self.parts();
        let start_x = if doc.settings.line_numbers {
            viewport::gutter_width(doc.end_num())
        } else {
            0
        };
        vp.set_start_x(start_x);
    }

    /// Recount the visual rows of the header lines.
    pub fn set_wrap_header_len(&mut self) {
        let (vp, doc) = self.parts();
        let width = vp.content_width();
        let rows = (0..doc.settings.header).map(|n| line_rows(doc, n, width)).sum();
        vp.set_wrap_header_len(rows);
    }

    /// Clamp the position to the buffer and work out how far the screen reaches.
    ///
    /// Runs before every draw and before page-sized moves.
    pub fn layout(&mut self) {
        let (vp, doc) = self.parts();
        let width = vp.content_width();
        let height = vp.height() as usize;
        let header = doc.settings.header;
        let wrap = doc.settings.wrap;
        let body = vp.body_rows(header, wrap);
        let last = doc.end_num().saturating_sub(1);

        let max_start = if wrap {
            viewport::bottom_line_num_wrapped(last, header, body, |n| line_rows(doc, n, width))
        } else {
            viewport::bottom_line_num(last, header, height)
        };
        if doc.position.line_num > max_start {
            doc.position.line_num = max_start;
        }

        let top = doc.position.line_num + header;
        let shown = if wrap {
            let max_branch = line_rows(doc, top, width) - 1;
            doc.position.branch = doc.position.branch.min(max_branch);
            let branch = doc.position.branch;
            viewport::lines_in_body(body, branch, |i| line_rows(doc, top + i, width))
        } else {
            doc.position.branch = 0;
            body
        };
        vp.set_bottom_pos(top + shown);
    }

    /// Raw lines visible below the header as of the last layout.
    pub fn real_height(&self) -> usize {
        let doc = self.doc();
        viewport::real_height(
            self.viewport.bottom_pos(),
            doc.position.line_num,
            doc.settings.header,
        )
    }

    /// What each content row shows, top to bottom; `None` past the end.
    pub fn screen_rows(&mut self) -> Vec<Option<ScreenRow>> {
        let (vp, doc) = self.parts();
        let height = vp.height() as usize;
        let width = vp.content_width();
        let header = doc.settings.header;
        let wrap = doc.settings.wrap;
        let end = doc.end_num();
        let mut rows = Vec::with_capacity(height);

        let push_line = |rows: &mut Vec<Option<ScreenRow>>, doc: &mut Document, line, first, is_header| {
            if line >= end {
                rows.push(None);
                return;
            }
            let count = if wrap { line_rows(doc, line, width) } else { 1 };
            for branch in first..count.max(first + 1) {
                if rows.len() >= height {
                    break;
                }
                rows.push(Some(ScreenRow {
                    line,
                    branch,
                    is_header,
                }));
            }
        };

        for line in 0..header {
            if rows.len() >= height {
                break;
            }
            push_line(&mut rows, doc, line, 0, true);
        }
        let mut line = doc.position.line_num + header;
        let mut first = if wrap { doc.position.branch } else { 0 };
        while rows.len() < height {
            push_line(&mut rows, doc, line, first, false);
            line += 1;
            first = 0;
        }
        rows
    }

    /// Buffer lines on screen, each once, header first.
    pub fn screen_lines(&mut self) -> Vec<usize> {
        let mut lines: Vec<usize> = self.screen_rows().into_iter().flatten().map(|r| r.line).collect();
        lines.dedup();
        lines
    }

    /// Raw text of the lines on screen.
    pub fn screen_text(&mut self) -> Vec<String> {
        let lines = self.screen_lines();
        let doc = self.doc();
        lines.into_iter().filter_map(|n| doc.raw_line(n)).collect()
    }

    /// Whether the whole buffer fits on one screen.
    pub fn contents_small(&mut self) -> bool {
        let (vp, doc) = self.parts();
        let width = vp.content_width();
        let height = vp.height() as usize;
        let mut used = 0;
        for n in 0..doc.end_num() {
            used += if doc.settings.wrap { line_rows(doc, n, width) } else { 1 };
            if used > height {
                return false;
            }
        }
        true
    }

    pub fn toggle_wrap(&mut self) {
        let doc = self.doc_mut();
        doc.settings.wrap = !doc.settings.wrap;
        doc.position.x = 0;
        doc.position.branch = 0;
        self.set_wrap_header_len();
    }

    pub fn toggle_column_mode(&mut self) {
        let doc = self.doc_mut();
        doc.settings.column_mode = !doc.settings.column_mode;
    }

    pub fn toggle_alternate_rows(&mut self) {
        let doc = self.doc_mut();
        doc.invalidate_cache();
        doc.settings.alternate_rows = !doc.settings.alternate_rows;
    }

    pub fn toggle_line_numbers(&mut self) {
        let doc = self.doc_mut();
        doc.settings.line_numbers = !doc.settings.line_numbers;
        self.view_sync();
    }

    pub fn toggle_follow(&mut self) {
        let doc = self.doc_mut();
        doc.settings.follow = !doc.settings.follow;
        let state = if doc.settings.follow { "on" } else { "off" };
        self.set_message(format!("Follow mode {state}"));
    }

    /// Show the key binding list.
    pub fn to_help(&mut self) {
        self.active = Active::Help;
        self.input.mode = InputMode::Help;
        self.selection = None;
        self.view_sync();
    }

    /// Leave help or a prompt and show the current document.
    pub fn to_normal(&mut self) {
        self.active = Active::Document;
        self.input.mode = InputMode::Normal;
        self.view_sync();
    }

    /// Show `docs[index]`, clamped to the list.
    pub fn select_document(&mut self, index: usize) {
        self.current = index.min(self.docs.len() - 1);
        self.selection = None;
        self.to_normal();
        tracing::debug!(index = self.current, name = self.doc().name(), "document.switch");
    }

    pub fn next_doc(&mut self) {
        self.select_document(self.current + 1);
    }

    pub fn prev_doc(&mut self) {
        self.select_document(self.current.saturating_sub(1));
    }

    /// Open `doc` and switch to it.
    ///
    /// The startup ticker only knows the initial buffers, so a document that
    /// is still being read gets a ticker of its own.
    pub fn add_document(&mut self, doc: Document) {
        if !doc.is_eof()
            && let Some(tx) = &self.ticks
            && let Err(err) = producers::spawn_ticker(tx.clone(), vec![doc.buffer()], producers::TICK_INTERVAL)
        {
            tracing::warn!(%err, name = doc.name(), "failed to start ticker");
        }
        self.docs.push(doc);
        self.select_document(self.docs.len() - 1);
    }
}

/// Visual rows of buffer line `n` at `width`. Lines not read yet count as one.
pub(super) fn line_rows(doc: &mut Document, n: usize, width: usize) -> usize {
    doc.contents(n)
        .map_or(1, |line| viewport::visual_rows(line.len(), width))
}
