use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// A single display cell group produced from one source character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Text drawn for this character (tab stops and control characters expand).
    pub text: String,
    /// First screen column occupied.
    pub col: usize,
    /// Number of screen columns occupied.
    pub width: usize,
}

/// A buffer line expanded for display at a given tab width.
///
/// `text` is the expanded string that column mode searches for delimiters;
/// `cells` carry the screen column of every piece of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedLine {
    text: String,
    cells: Vec<Cell>,
    /// Byte offset into `text` where each cell starts.
    starts: Vec<usize>,
    width: usize,
}

impl RenderedLine {
    /// Expand `raw` for display, turning tabs into spaces up to the next stop.
    pub fn render(raw: &str, tab_width: usize) -> Self {
        let tab_width = tab_width.max(1);
        let mut line = Self::default();
        for ch in raw.chars() {
            let piece = match ch {
                '\t' => " ".repeat(tab_width - line.width % tab_width),
                c if c.is_control() => caret_notation(c),
                c => c.to_string(),
            };
            let width = match ch {
                '\t' => piece.len(),
                c if c.is_control() => piece.chars().count(),
                c => c.width().unwrap_or(0),
            };
            line.starts.push(line.text.len());
            line.text.push_str(&piece);
            line.cells.push(Cell {
                text: piece,
                col: line.width,
                width,
            });
            line.width += width;
        }
        line
    }

    /// Number of screen columns the line occupies.
    pub const fn len(&self) -> usize {
        self.width
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Screen column where the byte offset `byte` of [`Self::text`] is drawn.
    pub fn col_at_byte(&self, byte: usize) -> usize {
        if byte >= self.text.len() {
            return self.width;
        }
        match self.starts.binary_search(&byte) {
            Ok(idx) => self.cells[idx].col,
            Err(0) => 0,
            Err(idx) => self.cells[idx - 1].col,
        }
    }

    /// Screen column span of a byte range of [`Self::text`].
    pub fn cols_for(&self, bytes: Range<usize>) -> Range<usize> {
        let start = self.col_at_byte(bytes.start);
        let end = self.col_at_byte(bytes.end);
        start..end.max(start)
    }

    /// Cells whose first column falls inside `cols`.
    pub fn cells_in(&self, cols: Range<usize>) -> impl Iterator<Item = &Cell> {
        let first = self.cells.partition_point(|c| c.col < cols.start);
        self.cells[first..]
            .iter()
            .take_while(move |c| c.col < cols.end)
    }
}

fn caret_notation(c: char) -> String {
    let code = c as u32;
    if code < 0x20 {
        // ^@ .. ^_
        let shown = char::from_u32(code + 0x40).unwrap_or('?');
        format!("^{shown}")
    } else if code == 0x7f {
        "^?".to_string()
    } else {
        format!("<{code:02x}>")
    }
}

/// Locate field `number` of `s`, where fields are separated by `delimiter`.
///
/// Returns the byte range of the field, or `None` when the line has fewer
/// fields. An empty delimiter yields a single field spanning the line.
pub fn range_position(s: &str, delimiter: &str, number: usize) -> Option<Range<usize>> {
    if delimiter.is_empty() {
        return (number == 0).then_some(0..s.len());
    }
    let mut start = 0;
    for _ in 0..number {
        let found = s[start..].find(delimiter)?;
        start += found + delimiter.len();
    }
    let end = s[start..].find(delimiter).map_or(s.len(), |i| start + i);
    Some(start..end)
}
