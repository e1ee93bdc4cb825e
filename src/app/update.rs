use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::Model;
use crate::app::keymap::{Action, action_for_key};
use crate::app::model::{LineSelection, SelectionState};
use crate::app::prompt::{InputError, InputMode, parse_number};
use crate::document::Document;
use crate::search::{Direction, Matcher};

/// Everything the dispatch loop reacts to.
///
/// Producers build these and put them on the event queue; [`update`] is the
/// only place they are applied.
#[derive(Debug)]
pub enum Message {
    /// Leave the pager, optionally printing the screen afterwards
    Quit { after_write: bool },
    /// Periodic refresh while input is still arriving
    Tick,
    /// Open a document and show it
    SwitchDocument(Box<Document>),
    /// Search forward for a literal string
    Search(String),
    /// Search backward for a literal string
    BackSearch(String),
    /// Go to a 1-based line number, given as typed
    Goto(String),
    /// Set the number of header lines, given as typed
    SetHeader(String),
    /// Set the column delimiter
    SetDelimiter(String),
    /// Set the tab width, given as typed
    SetTabWidth(String),
    /// Go to the first line
    JumpTop,
    /// Go to the end of the buffer as currently known
    JumpBottom,
    /// Terminal resized
    Resize(u16, u16),
    /// Key press from the terminal
    Key(KeyEvent),
    /// Mouse action from the terminal
    Mouse(MouseEvent),
}

impl Message {
    /// Short name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Quit { .. } => "quit",
            Self::Tick => "tick",
            Self::SwitchDocument(_) => "switch_document",
            Self::Search(_) => "search",
            Self::BackSearch(_) => "back_search",
            Self::Goto(_) => "goto",
            Self::SetHeader(_) => "set_header",
            Self::SetDelimiter(_) => "set_delimiter",
            Self::SetTabWidth(_) => "set_tab_width",
            Self::JumpTop => "jump_top",
            Self::JumpBottom => "jump_bottom",
            Self::Resize(..) => "resize",
            Self::Key(_) => "key",
            Self::Mouse(_) => "mouse",
        }
    }
}

/// Largest repeat count a digit prefix can build.
pub const MAX_REPEAT_COUNT: usize = 999_999;

/// Whether the dispatch loop keeps going after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Break,
}

/// Apply one message to the model.
///
/// This is the single place pager state changes. Nothing here blocks.
pub fn update(model: &mut Model, msg: Message) -> LoopControl {
    match msg {
        Message::Quit { after_write } => return quit(model, after_write),
        Message::Tick => {
            model.view_sync();
            if model.doc().settings.follow {
                model.move_bottom();
            }
        }
        Message::SwitchDocument(doc) => model.add_document(*doc),
        Message::Search(query) => model.search(&query, Direction::Forward),
        Message::BackSearch(query) => model.search(&query, Direction::Backward),
        Message::Goto(input) => model.goto_line(&input),
        Message::SetHeader(input) => model.set_header(&input),
        Message::SetDelimiter(input) => model.set_delimiter(&input),
        Message::SetTabWidth(input) => model.set_tab_width(&input),
        Message::JumpTop => model.move_top(),
        Message::JumpBottom => model.move_bottom(),
        Message::Resize(width, height) => model.resize(width, height),
        Message::Key(key) => {
            model.message.clear();
            if model.mode().is_prompt() {
                return prompt_key(model, key);
            }
            if let Some(action) = action_for_key(key) {
                return apply_action(model, action);
            }
            model.pending_count = None;
        }
        Message::Mouse(mouse) => handle_mouse(model, mouse),
    }
    LoopControl::Continue
}

/// Quit ends the loop only from `Normal`; it backs out of help and prompts.
fn quit(model: &mut Model, after_write: bool) -> LoopControl {
    match model.mode() {
        InputMode::Normal => {
            model.after_write |= after_write;
            tracing::debug!(after_write = model.after_write, "quit");
            LoopControl::Break
        }
        InputMode::Help => {
            model.to_normal();
            LoopControl::Continue
        }
        _ => {
            model.input.cancel();
            LoopControl::Continue
        }
    }
}

/// Run a key binding in `Normal` or `Help` mode.
pub fn apply_action(model: &mut Model, action: Action) -> LoopControl {
    if let Action::Digit(d) = action {
        let count = model.pending_count.unwrap_or(0);
        let count = count.saturating_mul(10).saturating_add(d as usize);
        model.pending_count = Some(count.min(MAX_REPEAT_COUNT));
        return LoopControl::Continue;
    }
    let in_help = model.mode() == InputMode::Help;
    match action {
        Action::Quit => return quit(model, false),
        Action::WriteQuit => return quit(model, true),
        Action::Help if in_help => model.to_normal(),
        Action::Help => model.to_help(),
        Action::Sync => {
            model.view_sync();
            model.full_redraw = true;
        }
        Action::Down => model.line_down(),
        Action::Up => model.line_up(),
        Action::Top => model.move_top(),
        Action::Bottom => model.move_bottom(),
        Action::Left => model.move_left(),
        Action::Right => model.move_right(),
        Action::HalfLeft => model.half_screen_left(),
        Action::HalfRight => model.half_screen_right(),
        Action::PageDown => model.page_down(),
        Action::PageUp => model.page_up(),
        Action::HalfDown => model.half_page_down(),
        Action::HalfUp => model.half_page_up(),
        Action::Mark => model.mark_line(),
        Action::NextMark => model.mark_next(),
        Action::PrevMark => model.mark_prev(),
        Action::ToggleWrap => model.toggle_wrap(),
        Action::ToggleColumnMode => model.toggle_column_mode(),
        Action::ToggleAlternateRows => model.toggle_alternate_rows(),
        Action::ToggleLineNumbers => model.toggle_line_numbers(),
        Action::ToggleFollow => model.toggle_follow(),
        Action::NextMatch => model.search_again(Direction::Forward),
        Action::PrevMatch => model.search_again(Direction::Backward),
        Action::NextDoc => model.next_doc(),
        Action::PrevDoc => model.prev_doc(),
        // Prompts only open from the document view.
        Action::Search
        | Action::BackSearch
        | Action::Goto
        | Action::Header
        | Action::Delimiter
        | Action::TabWidth
            if in_help => {}
        Action::Search => model.input.open(InputMode::Search),
        Action::BackSearch => model.input.open(InputMode::BackSearch),
        Action::Goto => model.input.open(InputMode::Goto),
        Action::Header => model.input.open(InputMode::SetHeader),
        Action::Delimiter => model.input.open(InputMode::SetDelimiter),
        Action::TabWidth => model.input.open(InputMode::SetTabWidth),
        Action::Digit(_) => {}
    }
    model.pending_count = None;
    LoopControl::Continue
}

/// Edit the prompt line; Enter turns it into the matching message.
fn prompt_key(model: &mut Model, key: KeyEvent) -> LoopControl {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let editor = &mut model.input.editor;
    match key.code {
        KeyCode::Enter => {
            if let Some((mode, text)) = model.input.submit() {
                let msg = match mode {
                    InputMode::Search => Message::Search(text),
                    InputMode::BackSearch => Message::BackSearch(text),
                    InputMode::Goto => Message::Goto(text),
                    InputMode::SetHeader => Message::SetHeader(text),
                    InputMode::SetDelimiter => Message::SetDelimiter(text),
                    InputMode::SetTabWidth => Message::SetTabWidth(text),
                    InputMode::Normal | InputMode::Help => return LoopControl::Continue,
                };
                return update(model, msg);
            }
        }
        KeyCode::Esc => model.input.cancel(),
        KeyCode::Char('c' | 'g') if ctrl => model.input.cancel(),
        KeyCode::Char('a') if ctrl => editor.home(),
        KeyCode::Char('e') if ctrl => editor.end(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.left(),
        KeyCode::Right => editor.right(),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(),
        KeyCode::Up => model.input.recall_older(),
        KeyCode::Down => model.input.recall_newer(),
        KeyCode::Tab => editor.insert('\t'),
        KeyCode::Char(c) if !ctrl => editor.insert(c),
        _ => {}
    }
    LoopControl::Continue
}

fn handle_mouse(model: &mut Model, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => model.wheel_down(),
        MouseEventKind::ScrollUp => model.wheel_up(),
        MouseEventKind::Down(MouseButton::Left) => {
            model.selection = line_at_row(model, mouse.row).map(|line| LineSelection {
                anchor: line,
                active: line,
                state: SelectionState::Dragging,
            });
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(line) = line_at_row(model, mouse.row)
                && let Some(sel) = model.selection.as_mut()
                && sel.state == SelectionState::Dragging
            {
                sel.active = line;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(mut sel) = model.selection.take() else {
                return;
            };
            if let Some(line) = line_at_row(model, mouse.row) {
                sel.active = line;
            }
            if sel.anchor == sel.active {
                // A plain click.
                return;
            }
            sel.state = SelectionState::Finalized;
            model.selection = Some(sel);
            let doc = model.doc();
            let text: Vec<String> = sel.lines().filter_map(|n| doc.raw_line(n)).collect();
            let count = text.len();
            model.clipboard = Some(text.join("\n"));
            model.set_message(format!("Copied {count} line(s)"));
        }
        _ => {}
    }
}

/// Buffer line drawn on screen row `row`, if any.
fn line_at_row(model: &mut Model, row: u16) -> Option<usize> {
    model
        .screen_rows()
        .get(row as usize)
        .copied()
        .flatten()
        .map(|r| r.line)
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Handlers for submitted prompts and the matching queue messages.
impl Model {
    /// Go to 1-based buffer line `input`, keeping the header in place.
    pub fn goto_line(&mut self, input: &str) {
        let n = match parse_number(input) {
            Ok(n) => n,
            Err(err) => return self.set_message(err.to_string()),
        };
        let header = to_i64(self.doc().settings.header);
        let target = usize::try_from(n.saturating_sub(header).saturating_sub(1)).unwrap_or(0);
        self.move_to(target);
        self.set_message(format!("Moved to line {n}"));
    }

    /// Remember the current line for `<` and `>`.
    pub fn mark_line(&mut self) {
        let doc = self.doc();
        let line = doc.position.line_num + doc.settings.header + 1;
        self.input.goto_candidates.push(line.to_string());
        self.set_message(format!("Marked to line {line}"));
    }

    pub fn mark_next(&mut self) {
        let target = self.input.goto_candidates.newer().map(str::to_string);
        self.recall_mark(target);
    }

    pub fn mark_prev(&mut self) {
        let target = self.input.goto_candidates.older().map(str::to_string);
        self.recall_mark(target);
    }

    fn recall_mark(&mut self, target: Option<String>) {
        match target {
            Some(line) => self.goto_line(&line),
            None => self.set_message("no marked lines"),
        }
    }

    pub fn set_header(&mut self, input: &str) {
        if let Err(err) = self.try_set_header(input) {
            self.set_message(err.to_string());
        }
    }

    fn try_set_header(&mut self, input: &str) -> Result<(), InputError> {
        let n = parse_number(input)?;
        let max = to_i64(self.viewport.height() as usize) - 1;
        if n < 0 || n > max {
            return Err(InputError::OutOfRange);
        }
        let n = usize::try_from(n).map_err(|_| InputError::OutOfRange)?;
        if self.doc().settings.header == n {
            return Ok(());
        }
        let doc = self.doc_mut();
        doc.settings.header = n;
        doc.invalidate_cache();
        self.set_wrap_header_len();
        self.set_message(format!("Set header {n}"));
        Ok(())
    }

    pub fn set_delimiter(&mut self, input: &str) {
        self.doc_mut().settings.column_delimiter = input.to_string();
        self.set_message(format!("Set delimiter {input}"));
    }

    pub fn set_tab_width(&mut self, input: &str) {
        if let Err(err) = self.try_set_tab_width(input) {
            self.set_message(err.to_string());
        }
    }

    fn try_set_tab_width(&mut self, input: &str) -> Result<(), InputError> {
        let n = parse_number(input)?;
        let width = usize::try_from(n).map_err(|_| InputError::OutOfRange)?;
        if width == 0 {
            return Err(InputError::OutOfRange);
        }
        if self.doc().settings.tab_width == width {
            return Ok(());
        }
        let doc = self.doc_mut();
        doc.settings.tab_width = width;
        doc.invalidate_cache();
        self.set_wrap_header_len();
        self.set_message(format!("Set tab width {width}"));
        Ok(())
    }

    /// Compile `query` and jump to its next match in `direction`.
    pub fn search(&mut self, query: &str, direction: Direction) {
        let Some(matcher) = Matcher::new(query, self.case_sensitive) else {
            self.last_search = None;
            return self.set_message("empty search");
        };
        self.last_search = Some(matcher.clone());
        self.run_search(&matcher, direction);
    }

    /// Repeat the last search.
    pub fn search_again(&mut self, direction: Direction) {
        match self.last_search.clone() {
            Some(matcher) => self.run_search(&matcher, direction),
            None => self.set_message("no previous search"),
        }
    }

    fn run_search(&mut self, matcher: &Matcher, direction: Direction) {
        let doc = self.doc();
        let header = doc.settings.header;
        let top = doc.position.line_num + header;
        let found = match direction {
            Direction::Forward => matcher.find_forward(doc, top + 1),
            Direction::Backward => top
                .checked_sub(1)
                .and_then(|from| matcher.find_backward(doc, from, header)),
        };
        tracing::debug!(query = matcher.query(), ?direction, ?found, "search");
        match found {
            Some(line) => self.move_to(line - header),
            None => self.set_message(format!("not found: {}", matcher.query())),
        }
    }
}
