use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Active, Model};

/// Prompt line while editing, otherwise the last message or the position.
pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let mode = model.mode();
    if mode.is_prompt() {
        let label = mode.prompt();
        let editor = &model.input.editor;
        let bar = Paragraph::new(format!("{label}{}", editor.text())).style(model.theme.prompt);
        frame.render_widget(bar, area);
        let offset = label.width() + editor.cursor_col();
        let x = u16::try_from(offset).unwrap_or(u16::MAX).min(area.width.saturating_sub(1));
        frame.set_cursor_position((area.x + x, area.y));
        return;
    }

    let left = if model.message.is_empty() {
        document_label(model)
    } else {
        model.message.clone()
    };
    let right = position_label(model);
    let gap = usize::from(area.width).saturating_sub(left.width() + right.width());
    let text = if gap == 0 {
        left
    } else {
        format!("{left}{}{right}", " ".repeat(gap))
    };
    frame.render_widget(Paragraph::new(text).style(model.theme.status), area);
}

fn document_label(model: &Model) -> String {
    if model.active == Active::Help {
        return "Help  q:back".to_string();
    }
    let name = model.doc().name();
    if model.docs.len() > 1 {
        format!("{name} [{}/{}]", model.current + 1, model.docs.len())
    } else {
        name.to_string()
    }
}

/// `top/end` of the buffer plus whether it is still being read.
fn position_label(model: &Model) -> String {
    let doc = model.doc();
    let end = doc.end_num();
    let top = (doc.position.line_num + doc.settings.header + 1).min(end);
    let state = if doc.settings.follow {
        "(follow)"
    } else if doc.is_eof() {
        "(EOF)"
    } else {
        "..."
    };
    format!("{top}/{end} {state}")
}
