use std::time::Duration;

use crossbeam_channel::bounded;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use proptest::prelude::*;

use crate::document::Document;

use super::update::MAX_REPEAT_COUNT;
use super::{App, InputMode, LoopControl, Message, Model, SelectionState, dispatch_loop, update};

fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Message {
    Message::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(model: &mut Model, text: &str) {
    for c in text.chars() {
        update(model, key(KeyCode::Char(c)));
    }
}

fn mouse(kind: MouseEventKind, row: u16) -> Message {
    Message::Mouse(MouseEvent {
        kind,
        column: 0,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// A model with `lines` numbered lines and `height` content rows, wrap off.
fn flat_model(lines: usize, height: u16) -> Model {
    let mut doc = Document::from_lines("t", (1..=lines).map(|i| format!("line {i}")));
    doc.settings.wrap = false;
    Model::new(vec![doc], (80, height + 1))
}

fn top(model: &Model) -> (usize, usize) {
    (model.doc().position.line_num, model.doc().position.branch)
}

/// A source that yields chunks as they are sent and ends when the sender drops.
struct ChunkReader(crossbeam_channel::Receiver<Vec<u8>>);

impl std::io::Read for ChunkReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let Ok(chunk) = self.0.recv() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        Ok(n)
    }
}

#[test]
fn test_page_down_then_up_returns_to_start() {
    let mut model = flat_model(100, 20);
    update(&mut model, key(KeyCode::PageDown));
    assert_eq!(top(&model), (20, 0));
    update(&mut model, key(KeyCode::PageUp));
    assert_eq!(top(&model), (0, 0));
}

#[test]
fn test_repeat_count_multiplies_page() {
    let mut model = flat_model(200, 20);
    type_text(&mut model, "3");
    assert_eq!(model.pending_count, Some(3));
    update(&mut model, key(KeyCode::PageDown));
    assert_eq!(top(&model), (60, 0));
    assert_eq!(model.pending_count, None);
}

#[test]
fn test_unbound_key_drops_repeat_count() {
    let mut model = flat_model(100, 20);
    type_text(&mut model, "4x");
    assert_eq!(model.pending_count, None);
    update(&mut model, key(KeyCode::Down));
    assert_eq!(top(&model), (1, 0));
}

#[test]
fn test_wrapped_line_takes_three_downs() {
    let doc = Document::from_lines("t", ["a".repeat(25), "b".into(), "c".into(), "d".into()]);
    let mut model = Model::new(vec![doc], (10, 4));
    update(&mut model, key(KeyCode::Char('j')));
    assert_eq!(top(&model), (0, 1));
    update(&mut model, key(KeyCode::Char('j')));
    assert_eq!(top(&model), (0, 2));
    update(&mut model, key(KeyCode::Char('j')));
    assert_eq!(top(&model), (1, 0));
    update(&mut model, key(KeyCode::Char('k')));
    assert_eq!(top(&model), (0, 2));
}

#[test]
fn test_column_mode_walks_fields() {
    let mut doc = Document::from_lines("t", ["id,name,age", "1,ann,30"]);
    doc.settings.wrap = false;
    let mut model = Model::new(vec![doc], (80, 24));
    update(&mut model, key(KeyCode::Char('c')));
    let pos = |m: &Model| (m.doc().position.column_num, m.doc().position.x);
    update(&mut model, key(KeyCode::Right));
    assert_eq!(pos(&model), (1, 3));
    update(&mut model, key(KeyCode::Right));
    assert_eq!(pos(&model), (2, 8));
    update(&mut model, key(KeyCode::Right));
    assert_eq!(pos(&model), (0, 0));
}

#[test]
fn test_set_header_out_of_range_is_rejected() {
    let mut model = flat_model(100, 10);
    update(&mut model, key(KeyCode::Char('H')));
    assert_eq!(model.mode(), InputMode::SetHeader);
    type_text(&mut model, "10");
    update(&mut model, key(KeyCode::Enter));
    assert_eq!(model.mode(), InputMode::Normal);
    assert_eq!(model.message, "out of range");
    assert_eq!(model.doc().settings.header, 0);

    update(&mut model, key(KeyCode::Char('H')));
    type_text(&mut model, "2");
    update(&mut model, key(KeyCode::Enter));
    assert_eq!(model.message, "Set header 2");
    assert_eq!(model.doc().settings.header, 2);
}

#[test]
fn test_set_header_rejects_garbage() {
    let mut model = flat_model(100, 10);
    update(&mut model, Message::SetHeader("two".into()));
    assert_eq!(model.message, "invalid number");
}

#[test]
fn test_quit_from_help_returns_to_document() {
    let mut model = flat_model(10, 5);
    update(&mut model, key(KeyCode::Char('h')));
    assert_eq!(model.mode(), InputMode::Help);
    assert_eq!(update(&mut model, key(KeyCode::Char('q'))), LoopControl::Continue);
    assert_eq!(model.mode(), InputMode::Normal);
    assert_eq!(update(&mut model, key(KeyCode::Char('q'))), LoopControl::Break);
    assert!(!model.after_write);
}

#[test]
fn test_write_quit_sets_after_write() {
    let mut model = flat_model(10, 5);
    assert_eq!(update(&mut model, key(KeyCode::Char('Q'))), LoopControl::Break);
    assert!(model.after_write);
}

#[test]
fn test_quit_message_cancels_open_prompt() {
    let mut model = flat_model(10, 5);
    update(&mut model, key(KeyCode::Char('/')));
    let control = update(&mut model, Message::Quit { after_write: false });
    assert_eq!(control, LoopControl::Continue);
    assert_eq!(model.mode(), InputMode::Normal);
}

#[test]
fn test_prompt_keys_do_not_trigger_bindings() {
    let mut model = flat_model(100, 10);
    update(&mut model, key(KeyCode::Char(':')));
    type_text(&mut model, "qj");
    assert_eq!(model.mode(), InputMode::Goto);
    assert_eq!(model.input.editor.text(), "qj");
    update(&mut model, ctrl('g'));
    assert_eq!(model.mode(), InputMode::Normal);
    assert_eq!(top(&model), (0, 0));
}

#[test]
fn test_goto_prompt_moves_and_reports() {
    let mut model = flat_model(100, 10);
    update(&mut model, key(KeyCode::Char(':')));
    type_text(&mut model, "42");
    update(&mut model, key(KeyCode::Enter));
    assert_eq!(top(&model), (41, 0));
    assert_eq!(model.message, "Moved to line 42");
}

#[test]
fn test_goto_accounts_for_header() {
    let mut model = flat_model(100, 10);
    model.doc_mut().settings.header = 2;
    update(&mut model, Message::Goto("10".into()));
    assert_eq!(top(&model), (7, 0));
    update(&mut model, Message::Goto("1".into()));
    assert_eq!(top(&model), (0, 0));
}

#[test]
fn test_goto_extreme_numbers_do_not_overflow() {
    let mut model = flat_model(100, 10);
    model.doc_mut().settings.header = 2;
    update(&mut model, Message::Goto("-9223372036854775808".into()));
    assert_eq!(top(&model), (0, 0));

    update(&mut model, Message::Goto("9223372036854775807".into()));
    model.layout();
    assert_eq!(top(&model), (90, 0));

    update(&mut model, Message::Goto("99999999999999999999".into()));
    assert_eq!(model.message, "invalid number");
    assert_eq!(top(&model), (90, 0));
}

#[test]
fn test_huge_repeat_count_is_capped() {
    let mut model = flat_model(100, 10);
    let digits = "99999999999999999999";
    type_text(&mut model, digits);
    assert_eq!(model.pending_count, Some(MAX_REPEAT_COUNT));
    update(&mut model, key(KeyCode::PageDown));
    model.layout();
    assert_eq!(top(&model), (90, 0));

    type_text(&mut model, digits);
    update(&mut model, key(KeyCode::Char('j')));
    model.layout();
    assert_eq!(top(&model), (90, 0));

    type_text(&mut model, digits);
    update(&mut model, ctrl('u'));
    assert_eq!(top(&model), (0, 0));

    type_text(&mut model, digits);
    update(&mut model, key(KeyCode::Right));
    assert_eq!(model.doc().position.x, 999_999);
    type_text(&mut model, digits);
    update(&mut model, Message::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL)));
    assert_eq!(model.doc().position.x, 999_999 + 40 * 999_999);
    type_text(&mut model, digits);
    update(&mut model, Message::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL)));
    assert_eq!(model.doc().position.x, 999_999);
    type_text(&mut model, digits);
    update(&mut model, key(KeyCode::Left));
    assert_eq!(model.doc().position.x, 0);
}

#[test]
fn test_huge_repeat_count_walks_columns_back_to_first() {
    let mut doc = Document::from_lines("t", ["id,name,age"]);
    doc.settings.wrap = false;
    let mut model = Model::new(vec![doc], (80, 24));
    update(&mut model, key(KeyCode::Char('c')));
    type_text(&mut model, "99999999999999999999");
    update(&mut model, key(KeyCode::Right));
    assert_eq!((model.doc().position.column_num, model.doc().position.x), (0, 0));
}

#[test]
fn test_wrapped_page_up_returns_to_page_start() {
    let lines = (0..40).map(|i| if (5..10).contains(&i) { "x".repeat(35) } else { format!("{i}") });
    let mut model = Model::new(vec![Document::from_lines("t", lines)], (10, 21));
    model.move_to(5);
    model.page_down();
    assert_eq!(top(&model), (10, 0));
    model.page_up();
    assert_eq!(top(&model), (5, 0));
    model.page_up();
    assert_eq!(top(&model), (0, 0));
}

#[test]
fn test_document_opened_later_gets_its_own_ticker() {
    let (tx, rx) = bounded(16);
    let mut model = flat_model(5, 4).with_ticks(tx);
    let (feed, chunks) = bounded::<Vec<u8>>(4);
    let doc = Document::from_reader("pipe", ChunkReader(chunks)).unwrap();
    update(&mut model, Message::SwitchDocument(Box::new(doc)));
    assert_eq!(model.doc().name(), "pipe");

    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(msg.kind(), "tick");

    feed.send(b"late line\n".to_vec()).unwrap();
    drop(feed);
    model.doc().buffer().wait_for(usize::MAX, Duration::from_secs(5));
    update(&mut model, msg);
    model.layout();
    assert_eq!(model.screen_text().first().map(String::as_str), Some("late line"));
}

#[test]
fn test_finished_document_opened_later_starts_no_ticker() {
    let (tx, rx) = bounded(16);
    let mut model = flat_model(5, 4).with_ticks(tx);
    update(&mut model, Message::SwitchDocument(Box::new(Document::from_lines("done", ["x"]))));
    drop(model);
    assert!(rx.recv().is_err(), "no ticker should hold the queue open");
}

#[test]
fn test_key_press_clears_message() {
    let mut model = flat_model(100, 10);
    update(&mut model, Message::Goto("5".into()));
    assert!(!model.message.is_empty());
    update(&mut model, key(KeyCode::Down));
    assert!(model.message.is_empty());
}

#[test]
fn test_marks_cycle_through_positions() {
    let mut model = flat_model(100, 10);
    update(&mut model, Message::Goto("10".into()));
    update(&mut model, key(KeyCode::Char('m')));
    update(&mut model, Message::Goto("30".into()));
    update(&mut model, key(KeyCode::Char('m')));
    update(&mut model, key(KeyCode::Home));

    update(&mut model, key(KeyCode::Char('<')));
    assert_eq!(top(&model), (29, 0));
    update(&mut model, key(KeyCode::Char('<')));
    assert_eq!(top(&model), (9, 0));
    update(&mut model, key(KeyCode::Char('>')));
    assert_eq!(top(&model), (29, 0));
}

#[test]
fn test_marks_survive_header() {
    let mut model = flat_model(100, 10);
    model.doc_mut().settings.header = 3;
    model.move_to(12);
    update(&mut model, key(KeyCode::Char('m')));
    model.move_top();
    update(&mut model, key(KeyCode::Char('<')));
    assert_eq!(top(&model), (12, 0));
}

#[test]
fn test_no_marks_reports() {
    let mut model = flat_model(10, 5);
    update(&mut model, key(KeyCode::Char('>')));
    assert_eq!(model.message, "no marked lines");
}

#[test]
fn test_search_and_repeat() {
    let doc = Document::from_lines("t", ["alpha", "beta", "gamma", "beta two", "delta", "beta three"]);
    let mut model = Model::new(vec![doc], (80, 3));
    update(&mut model, key(KeyCode::Char('/')));
    type_text(&mut model, "beta");
    update(&mut model, key(KeyCode::Enter));
    assert_eq!(top(&model), (1, 0));

    update(&mut model, key(KeyCode::Char('n')));
    assert_eq!(top(&model), (3, 0));
    update(&mut model, key(KeyCode::Char('n')));
    assert_eq!(top(&model), (5, 0));
    update(&mut model, key(KeyCode::Char('n')));
    assert_eq!(model.message, "not found: beta");
    assert_eq!(top(&model), (5, 0));

    update(&mut model, key(KeyCode::Char('N')));
    assert_eq!(top(&model), (3, 0));
}

#[test]
fn test_search_is_case_insensitive_by_default() {
    let doc = Document::from_lines("t", ["a", "b", "Needle"]);
    let mut model = Model::new(vec![doc], (80, 3));
    update(&mut model, Message::Search("needle".into()));
    assert_eq!(top(&model), (2, 0));

    let doc = Document::from_lines("t", ["a", "b", "Needle"]);
    let mut model = Model::new(vec![doc], (80, 3)).with_case_sensitive(true);
    update(&mut model, Message::Search("needle".into()));
    assert_eq!(model.message, "not found: needle");
}

#[test]
fn test_back_search_stays_below_header() {
    let mut doc = Document::from_lines("t", ["key", "x", "key", "y", "z"]);
    doc.settings.header = 1;
    let mut model = Model::new(vec![doc], (80, 3));
    model.move_to(3);
    update(&mut model, Message::BackSearch("key".into()));
    assert_eq!(top(&model), (1, 0));
    update(&mut model, Message::BackSearch("key".into()));
    assert_eq!(model.message, "not found: key");
}

#[test]
fn test_repeat_without_search_reports() {
    let mut model = flat_model(10, 5);
    update(&mut model, key(KeyCode::Char('n')));
    assert_eq!(model.message, "no previous search");
}

#[test]
fn test_prompt_history_recall() {
    let mut model = flat_model(100, 10);
    for n in ["5", "9"] {
        update(&mut model, key(KeyCode::Char(':')));
        type_text(&mut model, n);
        update(&mut model, key(KeyCode::Enter));
    }
    update(&mut model, key(KeyCode::Char(':')));
    update(&mut model, key(KeyCode::Up));
    assert_eq!(model.input.editor.text(), "9");
    update(&mut model, key(KeyCode::Up));
    assert_eq!(model.input.editor.text(), "5");
    update(&mut model, key(KeyCode::Down));
    assert_eq!(model.input.editor.text(), "9");
}

#[test]
fn test_tab_width_prompt() {
    let mut doc = Document::from_lines("t", ["a\tb"]);
    doc.settings.wrap = false;
    let mut model = Model::new(vec![doc], (80, 5));
    update(&mut model, Message::SetTabWidth("4".into()));
    assert_eq!(model.message, "Set tab width 4");
    assert_eq!(model.doc_mut().contents(0).unwrap().text(), "a   b");
    update(&mut model, Message::SetTabWidth("0".into()));
    assert_eq!(model.message, "out of range");
    assert_eq!(model.doc().settings.tab_width, 4);
}

#[test]
fn test_delimiter_prompt() {
    let mut model = flat_model(3, 5);
    update(&mut model, key(KeyCode::Char('d')));
    type_text(&mut model, "|");
    update(&mut model, key(KeyCode::Enter));
    assert_eq!(model.doc().settings.column_delimiter, "|");
    assert_eq!(model.message, "Set delimiter |");
}

#[test]
fn test_follow_tick_jumps_to_bottom() {
    let mut model = flat_model(100, 10);
    update(&mut model, key(KeyCode::Char('F')));
    assert_eq!(model.message, "Follow mode on");
    update(&mut model, Message::Tick);
    model.layout();
    assert_eq!(top(&model), (90, 0));
}

#[test]
fn test_switch_document_and_cycle() {
    let mut model = flat_model(10, 5);
    update(&mut model, Message::SwitchDocument(Box::new(Document::from_text("second", "x\ny"))));
    assert_eq!(model.doc().name(), "second");
    update(&mut model, key(KeyCode::Char('[')));
    assert_eq!(model.doc().name(), "t");
    update(&mut model, key(KeyCode::Char('[')));
    assert_eq!(model.current, 0);
    update(&mut model, key(KeyCode::Char(']')));
    update(&mut model, key(KeyCode::Char(']')));
    assert_eq!(model.current, 1);
}

#[test]
fn test_documents_keep_their_own_position() {
    let mut model = flat_model(100, 10);
    model.add_document(Document::from_text("b", "1\n2\n3"));
    model.prev_doc();
    update(&mut model, Message::Goto("50".into()));
    model.next_doc();
    assert_eq!(top(&model), (0, 0));
    model.prev_doc();
    assert_eq!(top(&model), (49, 0));
}

#[test]
fn test_resize_changes_page_size() {
    let mut model = flat_model(100, 20);
    update(&mut model, Message::Resize(80, 11));
    update(&mut model, key(KeyCode::PageDown));
    assert_eq!(top(&model), (10, 0));
}

#[test]
fn test_drag_selects_and_copies_lines() {
    let mut model = flat_model(100, 10);
    update(&mut model, mouse(MouseEventKind::Down(MouseButton::Left), 1));
    update(&mut model, mouse(MouseEventKind::Drag(MouseButton::Left), 2));
    assert_eq!(model.selection.map(|s| s.state), Some(SelectionState::Dragging));
    update(&mut model, mouse(MouseEventKind::Up(MouseButton::Left), 3));

    let sel = model.selection.unwrap();
    assert_eq!(sel.state, SelectionState::Finalized);
    assert_eq!(sel.lines(), 1..=3);
    assert_eq!(model.clipboard.as_deref(), Some("line 2\nline 3\nline 4"));
    assert_eq!(model.message, "Copied 3 line(s)");
}

#[test]
fn test_click_without_drag_selects_nothing() {
    let mut model = flat_model(100, 10);
    update(&mut model, mouse(MouseEventKind::Down(MouseButton::Left), 4));
    update(&mut model, mouse(MouseEventKind::Up(MouseButton::Left), 4));
    assert!(model.selection.is_none());
    assert!(model.clipboard.is_none());
}

#[test]
fn test_movement_clears_selection() {
    let mut model = flat_model(100, 10);
    update(&mut model, mouse(MouseEventKind::Down(MouseButton::Left), 0));
    update(&mut model, mouse(MouseEventKind::Up(MouseButton::Left), 2));
    assert!(model.selection.is_some());
    update(&mut model, key(KeyCode::Down));
    assert!(model.selection.is_none());
}

#[test]
fn test_wheel_scrolls() {
    let mut model = flat_model(100, 10);
    update(&mut model, mouse(MouseEventKind::ScrollDown, 0));
    assert_eq!(top(&model), (3, 0));
}

#[test]
fn test_sync_requests_full_redraw() {
    let mut model = flat_model(10, 5);
    update(&mut model, ctrl('l'));
    assert!(model.full_redraw);
}

#[test]
fn test_dispatch_loop_applies_in_order_and_stops_on_quit() {
    let mut model = flat_model(100, 10);
    let (tx, rx) = bounded(8);
    tx.send(Message::Goto("30".into())).unwrap();
    tx.send(key(KeyCode::Down)).unwrap();
    tx.send(Message::Quit { after_write: true }).unwrap();
    tx.send(Message::Goto("1".into())).unwrap();

    let mut frames = 0;
    dispatch_loop(&mut model, &rx, |_| {
        frames += 1;
        Ok(())
    })
    .unwrap();

    assert_eq!(top(&model), (30, 0));
    assert!(model.after_write);
    assert_eq!(frames, 3);
    assert_eq!(rx.len(), 1);
}

#[test]
fn test_dispatch_loop_ends_when_senders_drop() {
    let mut model = flat_model(10, 5);
    let (tx, rx) = bounded(1);
    drop(tx);
    dispatch_loop(&mut model, &rx, |_| Ok(())).unwrap();
}

#[test]
fn test_dispatch_loop_propagates_draw_errors() {
    let mut model = flat_model(10, 5);
    let (_tx, rx) = bounded::<Message>(1);
    let result = dispatch_loop(&mut model, &rx, |_| anyhow::bail!("terminal gone"));
    assert!(result.is_err());
}

#[test]
fn test_handle_commands_reach_the_loop() {
    let app = App::new(Vec::new());
    let handle = app.handle();
    let rx = app.rx.clone();
    let mut model = flat_model(100, 10);
    let worker = std::thread::spawn(move || {
        handle.jump_to_line(20).unwrap();
        handle.search("line 25").unwrap();
        handle.quit().unwrap();
    });
    dispatch_loop(&mut model, &rx, |_| Ok(())).unwrap();
    worker.join().unwrap();
    assert_eq!(top(&model), (24, 0));
}

#[test]
fn test_tick_recomputes_gutter_for_new_lines() {
    let text: String = (1..=120).map(|i| format!("{i}\n")).collect();
    let doc = Document::from_reader("stdin", std::io::Cursor::new(text)).unwrap();
    let mut model = Model::new(vec![doc], (80, 11));
    model.doc_mut().settings.line_numbers = true;
    model.doc().buffer().wait_for(usize::MAX, Duration::from_secs(5));
    update(&mut model, Message::Tick);
    assert_eq!(model.viewport.start_x(), 4);
}

proptest! {
    #[test]
    fn prop_down_then_up_is_identity_without_wrap(start in 0usize..80, n in 1usize..20) {
        let mut model = flat_model(100, 10);
        model.move_to(start);
        model.line_down_by(n);
        model.line_up_by(n);
        prop_assert_eq!(top(&model), (start, 0));
    }

    #[test]
    fn prop_wrap_branch_stays_in_line(lens in prop::collection::vec(0usize..60, 1..20), moves in prop::collection::vec(any::<bool>(), 0..60)) {
        let lines: Vec<String> = lens.iter().map(|&n| "x".repeat(n)).collect();
        let mut model = Model::new(vec![Document::from_lines("t", lines)], (10, 6));
        for down in moves {
            if down { model.line_down_by(1) } else { model.line_up_by(1) }
            model.layout();
            let (line, branch) = top(&model);
            let len = lens.get(line).copied().unwrap_or(0);
            prop_assert!(branch <= len / 10, "line {} branch {}", line, branch);
        }
    }

    #[test]
    fn prop_wrapped_down_then_up_is_identity(lens in prop::collection::vec(0usize..60, 1..20), n in 0usize..40) {
        let rows: usize = lens.iter().map(|len| len / 10 + 1).sum();
        prop_assume!(n < rows);
        let lines: Vec<String> = lens.iter().map(|&len| "x".repeat(len)).collect();
        let mut model = Model::new(vec![Document::from_lines("t", lines)], (10, 6));
        for _ in 0..n {
            model.line_down_by(1);
        }
        for _ in 0..n {
            model.line_up_by(1);
        }
        prop_assert_eq!(top(&model), (0, 0));
    }

    #[test]
    fn prop_goto_lands_on_target_when_room(target in 1usize..=90) {
        let mut model = flat_model(100, 10);
        update(&mut model, Message::Goto(target.to_string()));
        model.layout();
        prop_assert_eq!(top(&model), (target - 1, 0));
    }

    #[test]
    fn prop_page_down_up_round_trips_away_from_end(start in 0usize..60) {
        let mut model = flat_model(100, 20);
        model.move_to(start);
        model.page_down();
        prop_assert!(model.doc().position.line_num > start);
        model.page_up();
        prop_assert_eq!(top(&model), (start, 0));
    }

    #[test]
    fn prop_wrapped_page_round_trip_never_lands_above_start(lens in prop::collection::vec(0usize..45, 60), start in 0usize..30) {
        let lines: Vec<String> = lens.iter().map(|&len| "x".repeat(len)).collect();
        let mut model = Model::new(vec![Document::from_lines("t", lines)], (10, 21));
        model.move_to(start);
        model.layout();
        prop_assume!(model.doc().position.line_num == start);
        let step = model.real_height().max(1);
        model.page_down();
        model.layout();
        let after = model.doc().position.line_num;
        prop_assume!(after == start + step);
        model.page_up();
        let back = model.doc().position.line_num;
        prop_assert!(back >= start && back < after, "{} -> {} -> {}", start, after, back);
    }

    #[test]
    fn prop_scroll_keys_ignored_while_wrapping(x in -10isize..100, keys in prop::collection::vec(0u8..4, 0..20)) {
        let mut model = Model::new(vec![Document::from_text("t", "a long enough line")], (80, 24));
        model.doc_mut().position.x = x;
        for k in keys {
            match k {
                0 => model.scroll_left(),
                1 => model.scroll_right(),
                2 => model.half_screen_left(),
                _ => model.half_screen_right(),
            }
        }
        prop_assert_eq!(model.doc().position.x, x);
    }
}
