//! Line storage and per-document view state.
//!
//! This module handles:
//! - Reading files or stdin incrementally on a background thread
//! - Rendering lines for display (tab expansion, cell widths) with a cache
//! - The cursor position and display settings of each open document

mod buffer;
mod reader;
mod types;

pub use buffer::LineBuffer;
pub use types::{Cell, RenderedLine, range_position};

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

/// Rendered lines kept before the cache is dropped wholesale.
const CACHE_LIMIT: usize = 8192;

pub const DEFAULT_TAB_WIDTH: usize = 8;
pub const DEFAULT_DELIMITER: &str = ",";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The line has not been read (yet).
    #[error("line {0} is out of range")]
    OutOfRange(usize),
}

/// Display settings of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Number of leading lines pinned to the top of the screen.
    pub header: usize,
    pub tab_width: usize,
    pub column_delimiter: String,
    pub wrap: bool,
    pub column_mode: bool,
    pub line_numbers: bool,
    pub alternate_rows: bool,
    /// Jump to the bottom on every timer tick.
    pub follow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            header: 0,
            tab_width: DEFAULT_TAB_WIDTH,
            column_delimiter: DEFAULT_DELIMITER.to_string(),
            wrap: true,
            column_mode: false,
            line_numbers: false,
            alternate_rows: false,
            follow: false,
        }
    }
}

/// Where a document is being viewed from.
///
/// `line_num` counts body lines, so the first body row shows buffer line
/// `line_num + header`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line_num: usize,
    /// Visual row within the wrapped line at the top of the body.
    pub branch: usize,
    /// Horizontal scroll in columns; may dip below zero down to the view's minimum.
    pub x: isize,
    /// Selected field in column mode.
    pub column_num: usize,
}

#[derive(Debug, Default)]
struct RenderCache {
    tab_width: usize,
    lines: HashMap<usize, Arc<RenderedLine>>,
}

/// An open buffer: shared line storage plus its own position and settings.
pub struct Document {
    name: String,
    buffer: Arc<LineBuffer>,
    cache: RenderCache,
    pub position: Position,
    pub settings: Settings,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("end_num", &self.end_num())
            .field("eof", &self.is_eof())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Document {
    fn with_buffer(name: impl Into<String>, buffer: Arc<LineBuffer>) -> Self {
        Self {
            name: name.into(),
            buffer,
            cache: RenderCache::default(),
            position: Position::default(),
            settings: Settings::default(),
        }
    }

    /// A fully loaded document holding `lines`.
    pub fn from_lines<S: Into<String>>(name: impl Into<String>, lines: impl IntoIterator<Item = S>) -> Self {
        let lines = lines.into_iter().map(Into::into).collect();
        Self::with_buffer(name, Arc::new(LineBuffer::from_lines(lines)))
    }

    /// A fully loaded document split from `text` on newlines.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::from_lines(name, text.lines())
    }

    /// Read `source` incrementally on a background thread.
    ///
    /// # Errors
    /// Returns an error if the reader thread cannot be spawned.
    pub fn from_reader<R>(name: impl Into<String>, source: R) -> std::io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let name = name.into();
        let buffer = Arc::new(LineBuffer::new());
        reader::spawn_reader(&name, source, Arc::clone(&buffer))?;
        Ok(Self::with_buffer(name, buffer))
    }

    /// Open `path`, reading it in the background.
    ///
    /// With `follow`, the file is never considered finished and lines
    /// appended later keep arriving.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path, follow: bool) -> std::io::Result<Self> {
        let name = path.display().to_string();
        if follow {
            let buffer = Arc::new(LineBuffer::new());
            reader::spawn_follower(path, Arc::clone(&buffer))?;
            let mut doc = Self::with_buffer(name, buffer);
            doc.settings.follow = true;
            return Ok(doc);
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(name, file)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the underlying storage, for producers that only query it.
    pub fn buffer(&self) -> Arc<LineBuffer> {
        Arc::clone(&self.buffer)
    }

    /// Number of lines known so far.
    pub fn end_num(&self) -> usize {
        self.buffer.end_num()
    }

    /// Whether the source has been read completely.
    pub fn is_eof(&self) -> bool {
        self.buffer.is_eof()
    }

    /// The unrendered text of line `n`.
    pub fn raw_line(&self, n: usize) -> Option<String> {
        self.buffer.line(n)
    }

    /// Line `n` rendered at `tab_width`.
    ///
    /// # Errors
    /// Returns [`DocumentError::OutOfRange`] if line `n` has not been read.
    pub fn contents_at(&mut self, n: usize, tab_width: usize) -> Result<Arc<RenderedLine>, DocumentError> {
        if self.cache.tab_width != tab_width {
            self.cache.lines.clear();
            self.cache.tab_width = tab_width;
        }
        if let Some(line) = self.cache.lines.get(&n) {
            return Ok(Arc::clone(line));
        }
        let raw = self.buffer.line(n).ok_or(DocumentError::OutOfRange(n))?;
        let line = Arc::new(RenderedLine::render(&raw, tab_width));
        if self.cache.lines.len() >= CACHE_LIMIT {
            self.cache.lines.clear();
        }
        self.cache.lines.insert(n, Arc::clone(&line));
        Ok(line)
    }

    /// Line `n` rendered at the document's own tab width.
    ///
    /// # Errors
    /// Returns [`DocumentError::OutOfRange`] if line `n` has not been read.
    pub fn contents(&mut self, n: usize) -> Result<Arc<RenderedLine>, DocumentError> {
        let tab_width = self.settings.tab_width;
        self.contents_at(n, tab_width)
    }

    /// Drop every rendered line.
    pub fn invalidate_cache(&mut self) {
        self.cache.lines.clear();
    }
}
