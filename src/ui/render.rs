use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{LineSelection, Model, ScreenRow};
use crate::document::{RenderedLine, range_position};
use crate::search::Matcher;

use super::status;
use super::style::Theme;

/// Render the complete UI: content rows, then the status line.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let height = model.viewport.height().min(area.height);
    let content_area = Rect { height, ..area };
    let status_area = Rect {
        y: area.y + height,
        height: area.height.saturating_sub(height).min(1),
        ..area
    };

    let lines = content_lines(model);
    frame.render_widget(Clear, content_area);
    frame.render_widget(Paragraph::new(lines), content_area);
    if status_area.height > 0 {
        status::render_status_bar(model, frame, status_area);
    }
}

/// Everything a row needs that does not change from row to row.
struct RowContext<'a> {
    theme: Theme,
    matcher: Option<&'a Matcher>,
    selection: Option<LineSelection>,
    width: usize,
    gutter: usize,
    wrap: bool,
    x: isize,
    column: Option<(&'a str, usize)>,
    alternate: bool,
}

fn content_lines(model: &mut Model) -> Vec<Line<'static>> {
    let rows = model.screen_rows();
    let matcher = model.last_search.clone();
    let doc = model.doc();
    let settings = doc.settings.clone();
    let ctx = RowContext {
        theme: model.theme,
        matcher: matcher.as_ref(),
        selection: model.selection,
        width: model.viewport.content_width(),
        gutter: usize::from(model.viewport.start_x()),
        wrap: settings.wrap,
        x: doc.position.x,
        column: settings
            .column_mode
            .then_some((settings.column_delimiter.as_str(), doc.position.column_num)),
        alternate: settings.alternate_rows,
    };

    let doc = model.doc_mut();
    rows.into_iter()
        .map(|row| match row {
            Some(row) => match doc.contents(row.line) {
                Ok(rendered) => row_line(&ctx, row, &rendered),
                Err(_) => filler_line(&ctx),
            },
            None => filler_line(&ctx),
        })
        .collect()
}

fn filler_line(ctx: &RowContext<'_>) -> Line<'static> {
    Line::from(Span::styled("~", ctx.theme.filler))
}

fn row_line(ctx: &RowContext<'_>, row: ScreenRow, rendered: &RenderedLine) -> Line<'static> {
    let mut spans = Vec::new();
    if ctx.gutter > 0 {
        let number = if row.branch == 0 {
            format!("{:>w$} ", row.line + 1, w = ctx.gutter - 1)
        } else {
            " ".repeat(ctx.gutter)
        };
        spans.push(Span::styled(number, ctx.theme.gutter));
    }

    let mut base = Style::default();
    if row.is_header {
        base = base.patch(ctx.theme.header);
    } else if ctx.alternate && row.line % 2 == 1 {
        base = base.patch(ctx.theme.alternate);
    }
    if ctx.selection.is_some_and(|sel| sel.contains(row.line)) {
        base = base.patch(ctx.theme.selection);
    }

    let (cols, lead) = visible_cols(ctx, row.branch);
    if lead > 0 {
        spans.push(Span::styled(" ".repeat(lead), base));
    }

    let column = ctx
        .column
        .and_then(|(delim, n)| range_position(rendered.text(), delim, n))
        .map(|bytes| rendered.cols_for(bytes));
    let matches: Vec<Range<usize>> = ctx.matcher.map_or_else(Vec::new, |m| {
        m.ranges(rendered.text())
            .into_iter()
            .map(|bytes| rendered.cols_for(bytes))
            .collect()
    });

    let mut at = cols.start;
    let mut run = String::new();
    let mut run_style = base;
    for cell in rendered.cells_in(cols.clone()) {
        // A wide character cut by the left edge leaves a gap.
        if cell.col > at {
            push_run(&mut spans, &mut run, run_style);
            spans.push(Span::styled(" ".repeat(cell.col - at), base));
        }
        let mut style = base;
        if column.as_ref().is_some_and(|c| c.contains(&cell.col)) {
            style = style.patch(ctx.theme.column);
        }
        if matches.iter().any(|m| m.contains(&cell.col)) {
            style = style.patch(ctx.theme.search);
        }
        if style != run_style {
            push_run(&mut spans, &mut run, run_style);
            run_style = style;
        }
        run.push_str(&cell.text);
        at = cell.col + cell.width;
    }
    push_run(&mut spans, &mut run, run_style);
    Line::from(spans)
}

fn push_run(spans: &mut Vec<Span<'static>>, run: &mut String, style: Style) {
    if !run.is_empty() {
        spans.push(Span::styled(std::mem::take(run), style));
    }
}

/// Columns of the line drawn on a row, plus leading blanks for a negative scroll.
fn visible_cols(ctx: &RowContext<'_>, branch: usize) -> (Range<usize>, usize) {
    let width = ctx.width;
    if ctx.wrap {
        let start = branch * width;
        return (start..start + width, 0);
    }
    match usize::try_from(ctx.x) {
        Ok(x) => (x..x + width, 0),
        Err(_) => {
            let lead = ctx.x.unsigned_abs().min(width);
            (0..width - lead, lead)
        }
    }
}
