//! Screen geometry.
//!
//! The [`Viewport`] struct holds the view state shared by every document
//! (screen size, gutter, header height once wrapped, last drawn line), and
//! the free functions here map buffer lines onto screen rows. Nothing in
//! this module does I/O: line lengths come in as plain numbers or closures.

/// Default floor for horizontal scrolling, allowing a little space on the left.
pub const DEFAULT_MIN_START_X: isize = -10;

/// Tracks the terminal area available to the pager.
///
/// `height` counts content rows only; the status line sits below them.
///
/// # Example
///
/// ```
/// use tailview::ui::viewport::Viewport;
///
/// let vp = Viewport::new(80, 24);
/// assert_eq!(vp.height(), 23);
/// assert_eq!(vp.status_pos(), 23);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    start_x: u16,
    wrap_header_len: usize,
    bottom_pos: usize,
    min_start_x: isize,
}

impl Viewport {
    /// Create a viewport for a terminal of `width` x `height` cells.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height: height.saturating_sub(1),
            start_x: 0,
            wrap_header_len: 0,
            bottom_pos: 0,
            min_start_x: DEFAULT_MIN_START_X,
        }
    }

    /// Get the screen width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the number of content rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Row of the status line.
    pub const fn status_pos(&self) -> u16 {
        self.height
    }

    /// Columns reserved on the left for the line-number gutter.
    pub const fn start_x(&self) -> u16 {
        self.start_x
    }

    /// Columns available to line text once the gutter is taken off.
    pub const fn content_width(&self) -> usize {
        self.width.saturating_sub(self.start_x) as usize
    }

    /// Visual rows the header occupies when wrapped.
    pub const fn wrap_header_len(&self) -> usize {
        self.wrap_header_len
    }

    /// Body line number (header included) just past the last one drawn.
    pub const fn bottom_pos(&self) -> usize {
        self.bottom_pos
    }

    pub const fn min_start_x(&self) -> isize {
        self.min_start_x
    }

    /// Resize to a terminal of `width` x `height` cells.
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height.saturating_sub(1);
    }

    pub const fn set_start_x(&mut self, start_x: u16) {
        self.start_x = start_x;
    }

    pub const fn set_wrap_header_len(&mut self, rows: usize) {
        self.wrap_header_len = rows;
    }

    pub const fn set_bottom_pos(&mut self, pos: usize) {
        self.bottom_pos = pos;
    }

    pub const fn set_min_start_x(&mut self, min: isize) {
        self.min_start_x = min;
    }

    /// Rows the header takes on screen in the current wrap mode.
    pub const fn header_rows(&self, header: usize, wrap: bool) -> usize {
        if wrap { self.wrap_header_len } else { header }
    }

    /// Rows left for the body below the header.
    pub const fn body_rows(&self, header: usize, wrap: bool) -> usize {
        (self.height as usize).saturating_sub(self.header_rows(header, wrap))
    }
}

/// Visual rows a line of `len` columns takes when wrapped at `width`.
///
/// A zero width is treated as a single row.
pub const fn visual_rows(len: usize, width: usize) -> usize {
    if width == 0 { 1 } else { 1 + len / width }
}

/// Visual rows taken by the header lines whose lengths are given.
pub fn wrapped_header_len(lens: impl IntoIterator<Item = usize>, width: usize) -> usize {
    lens.into_iter().map(|len| visual_rows(len, width)).sum()
}

/// First body `line_num` that puts buffer line `target` on the last body row.
///
/// `height` is the number of content rows including the header. Returns 0
/// when everything up to `target` already fits.
pub const fn bottom_line_num(target: usize, header: usize, height: usize) -> usize {
    if target < header {
        return 0;
    }
    let rows = if height > header { height } else { header };
    (target + 1).saturating_sub(rows)
}

/// Wrapped counterpart of [`bottom_line_num`].
///
/// Walks backwards from `target`, spending `rows_of(line)` visual rows per
/// line until `body_rows` are used up. A line that would only partly fit
/// at the top is left out, unless `target` itself is taller than the body.
pub fn bottom_line_num_wrapped(
    target: usize,
    header: usize,
    body_rows: usize,
    mut rows_of: impl FnMut(usize) -> usize,
) -> usize {
    if target < header {
        return 0;
    }
    let mut remaining = body_rows;
    let mut first = target + 1;
    while first > header && remaining > 0 {
        let rows = rows_of(first - 1).max(1);
        if rows > remaining {
            break;
        }
        remaining -= rows;
        first -= 1;
    }
    first.min(target) - header
}

/// Raw lines that start within the body when drawing from `line_num`.
///
/// `rows_of(n)` gives the visual rows of body line `n` (0 for the top line);
/// `branch` rows of the top line are already scrolled off.
pub fn lines_in_body(body_rows: usize, branch: usize, mut rows_of: impl FnMut(usize) -> usize) -> usize {
    let mut used = 0;
    let mut count = 0;
    while used < body_rows {
        let rows = rows_of(count).max(1);
        let rows = if count == 0 { rows.saturating_sub(branch).max(1) } else { rows };
        used += rows;
        count += 1;
    }
    count
}

/// Raw lines visible below the header: `bottom_pos - (line_num + header)`.
pub const fn real_height(bottom_pos: usize, line_num: usize, header: usize) -> usize {
    bottom_pos.saturating_sub(line_num + header)
}

/// Gutter width for a buffer of `end_num` lines: digits plus a space.
pub fn gutter_width(end_num: usize) -> u16 {
    let digits = end_num.max(1).ilog10() + 1;
    u16::try_from(digits + 1).unwrap_or(u16::MAX)
}
