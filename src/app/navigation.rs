//! Cursor movement.
//!
//! Every operation clears the mouse selection first. Moves that need a
//! line's rendered length give up quietly when the line is not available
//! yet; the next tick or redraw will pick it up.

use crate::document::range_position;
use crate::ui::viewport::{bottom_line_num_wrapped, visual_rows};

use super::Model;
use super::model::line_rows;

/// Lines scrolled per mouse wheel notch.
pub const WHEEL_LINES: usize = 3;

fn to_isize(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

impl Model {
    /// Consume the typed repeat count, defaulting to one.
    pub fn take_count(&mut self) -> usize {
        self.pending_count.take().unwrap_or(1).max(1)
    }

    /// Start the body at `line` (counted below the header).
    pub fn move_to(&mut self, line: usize) {
        self.selection = None;
        let doc = self.doc_mut();
        doc.position.line_num = line;
        doc.position.branch = 0;
    }

    pub fn move_top(&mut self) {
        self.move_to(0);
    }

    /// Jump past the last known line; layout settles on the last screen.
    pub fn move_bottom(&mut self) {
        self.prepare_start_x();
        let end = self.doc().end_num();
        self.move_to(end + 1);
    }

    pub fn page_down(&mut self) {
        let count = self.take_count();
        self.layout();
        let step = self.real_height().max(1).saturating_mul(count);
        let line = self.doc().position.line_num;
        self.move_to(line.saturating_add(step));
    }

    /// Page up; in wrap mode the new screen ends just above the current top.
    pub fn page_up(&mut self) {
        let count = self.take_count();
        self.layout();
        let mut line = self.doc().position.line_num;
        if !self.doc().settings.wrap {
            let step = self.real_height().max(1).saturating_mul(count);
            self.move_to(line.saturating_sub(step));
            return;
        }
        for _ in 0..count {
            if line == 0 {
                break;
            }
            line = self.page_start_above(line);
        }
        self.move_to(line);
    }

    /// First body line of the wrapped screen that ends on body line `line - 1`.
    ///
    /// `line` must be at least 1. Always moves up by at least one line.
    fn page_start_above(&mut self, line: usize) -> usize {
        let (vp, doc) = self.parts();
        let width = vp.content_width();
        let header = doc.settings.header;
        let body = vp.body_rows(header, true);
        let above = line + header - 1;
        let start = bottom_line_num_wrapped(above, header, body, |n| line_rows(doc, n, width));
        start.min(line - 1)
    }

    pub fn half_page_down(&mut self) {
        let count = self.take_count();
        self.layout();
        let step = (self.real_height() / 2).max(1).saturating_mul(count);
        let line = self.doc().position.line_num;
        self.move_to(line.saturating_add(step));
    }

    pub fn half_page_up(&mut self) {
        let count = self.take_count();
        self.layout();
        let step = (self.real_height() / 2).max(1).saturating_mul(count);
        let line = self.doc().position.line_num;
        self.move_to(line.saturating_sub(step));
    }

    pub fn line_down(&mut self) {
        let count = self.take_count();
        self.line_down_by(count);
    }

    pub fn line_up(&mut self) {
        let count = self.take_count();
        self.line_up_by(count);
    }

    /// Move down `count` lines, or one wrapped row at a time in wrap mode.
    pub fn line_down_by(&mut self, count: usize) {
        self.selection = None;
        let (vp, doc) = self.parts();
        if !doc.settings.wrap {
            doc.position.branch = 0;
            doc.position.line_num = doc.position.line_num.saturating_add(count);
            return;
        }
        let top = doc.position.line_num + doc.settings.header;
        let Ok(line) = doc.contents(top) else {
            return;
        };
        let max_branch = visual_rows(line.len(), vp.content_width()) - 1;
        if doc.position.branch >= max_branch {
            doc.position.branch = 0;
            doc.position.line_num = doc.position.line_num.saturating_add(count);
        } else {
            doc.position.branch += 1;
        }
    }

    /// Move up `count` lines; in wrap mode, up one wrapped row at a time and
    /// onto the last row of the line above.
    pub fn line_up_by(&mut self, count: usize) {
        self.selection = None;
        let (vp, doc) = self.parts();
        if !doc.settings.wrap {
            doc.position.branch = 0;
            doc.position.line_num = doc.position.line_num.saturating_sub(count);
            return;
        }
        if doc.position.branch > 0 {
            doc.position.branch -= 1;
            return;
        }
        if doc.position.line_num == 0 {
            return;
        }
        let target = doc.position.line_num.saturating_sub(count);
        let Ok(line) = doc.contents(target + doc.settings.header) else {
            return;
        };
        doc.position.branch = visual_rows(line.len(), vp.content_width()) - 1;
        doc.position.line_num = target;
    }

    /// Left arrow: previous field in column mode, otherwise scroll.
    pub fn move_left(&mut self) {
        if self.doc().settings.column_mode {
            self.column_left();
        } else {
            self.scroll_left();
        }
    }

    /// Right arrow: next field in column mode, otherwise scroll.
    pub fn move_right(&mut self) {
        if self.doc().settings.column_mode {
            self.column_right();
        } else {
            self.scroll_right();
        }
    }

    pub fn column_left(&mut self) {
        let count = self.take_count();
        self.selection = None;
        let doc = self.doc_mut();
        if doc.position.column_num == 0 {
            return;
        }
        doc.position.column_num = doc.position.column_num.saturating_sub(count);
        self.update_column_x();
    }

    pub fn column_right(&mut self) {
        let count = self.take_count();
        self.selection = None;
        let doc = self.doc_mut();
        doc.position.column_num = doc.position.column_num.saturating_add(count);
        self.update_column_x();
    }

    /// Scroll so the selected field starts at the left edge.
    ///
    /// A field past the end of the top line wraps back to the first one.
    fn update_column_x(&mut self) {
        let doc = self.doc_mut();
        let top = doc.position.line_num + doc.settings.header;
        let Ok(line) = doc.contents(top) else {
            return;
        };
        let delimiter = doc.settings.column_delimiter.as_str();
        let range = match range_position(line.text(), delimiter, doc.position.column_num) {
            Some(range) => range,
            None => {
                doc.position.column_num = 0;
                let Some(range) = range_position(line.text(), delimiter, 0) else {
                    return;
                };
                range
            }
        };
        doc.position.x = to_isize(line.col_at_byte(range.start));
    }

    pub fn scroll_left(&mut self) {
        let count = self.take_count();
        self.selection = None;
        let min = self.viewport.min_start_x();
        let doc = self.doc_mut();
        if doc.settings.wrap {
            return;
        }
        doc.position.x = doc.position.x.saturating_sub(to_isize(count)).max(min);
    }

    pub fn scroll_right(&mut self) {
        let count = self.take_count();
        self.selection = None;
        let doc = self.doc_mut();
        if doc.settings.wrap {
            return;
        }
        doc.position.x = doc.position.x.saturating_add(to_isize(count));
    }

    /// Scroll left by half the screen, stopping at zero when crossing it.
    pub fn half_screen_left(&mut self) {
        let count = self.take_count();
        self.selection = None;
        let step = to_isize((usize::from(self.viewport.width()) / 2).saturating_mul(count));
        let min = self.viewport.min_start_x();
        let doc = self.doc_mut();
        if doc.settings.wrap {
            return;
        }
        let x = doc.position.x;
        let moved = x.saturating_sub(step);
        doc.position.x = if x > 0 && moved < 0 { 0 } else { moved.max(min) };
    }

    /// Scroll right by half the screen; from a negative offset, go to zero first.
    pub fn half_screen_right(&mut self) {
        let count = self.take_count();
        self.selection = None;
        let step = to_isize((usize::from(self.viewport.width()) / 2).saturating_mul(count));
        let doc = self.doc_mut();
        if doc.settings.wrap {
            return;
        }
        doc.position.x = if doc.position.x < 0 {
            0
        } else {
            doc.position.x.saturating_add(step)
        };
    }

    /// Scroll by whole visual rows, as the mouse wheel does.
    pub fn wheel_down(&mut self) {
        for _ in 0..WHEEL_LINES {
            self.line_down_by(1);
        }
    }

    pub fn wheel_up(&mut self) {
        for _ in 0..WHEEL_LINES {
            self.line_up_by(1);
        }
    }
}
