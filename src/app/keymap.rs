//! Key bindings for `Normal` and `Help` modes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    WriteQuit,
    Help,
    Sync,
    Down,
    Up,
    Top,
    Bottom,
    Left,
    Right,
    HalfLeft,
    HalfRight,
    PageDown,
    PageUp,
    HalfDown,
    HalfUp,
    Mark,
    NextMark,
    PrevMark,
    ToggleWrap,
    ToggleColumnMode,
    ToggleAlternateRows,
    ToggleLineNumbers,
    ToggleFollow,
    Search,
    BackSearch,
    NextMatch,
    PrevMatch,
    Goto,
    Header,
    Delimiter,
    TabWidth,
    NextDoc,
    PrevDoc,
    /// A digit of the repeat count prefix.
    Digit(u32),
}

/// Map a key press to its action, if it is bound.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match (key.code, ctrl) {
        (KeyCode::Char('c'), true) | (KeyCode::Esc, _) | (KeyCode::Char('q'), false) => Action::Quit,
        (KeyCode::Char('l'), true) => Action::Sync,
        (KeyCode::Char('n'), true) | (KeyCode::Enter | KeyCode::Down, _) | (KeyCode::Char('j'), false) => {
            Action::Down
        }
        (KeyCode::Char('p'), true) | (KeyCode::Up, _) | (KeyCode::Char('k'), false) => Action::Up,
        (KeyCode::Char('v' | 'f'), true) | (KeyCode::PageDown, _) | (KeyCode::Char(' '), false) => {
            Action::PageDown
        }
        (KeyCode::Char('b'), _) | (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::Char('d'), true) => Action::HalfDown,
        (KeyCode::Char('u'), true) => Action::HalfUp,
        (KeyCode::Left, true) => Action::HalfLeft,
        (KeyCode::Right, true) => Action::HalfRight,
        (KeyCode::Left, false) => Action::Left,
        (KeyCode::Right, false) => Action::Right,
        (KeyCode::Home, _) | (KeyCode::Char('g'), false) => Action::Top,
        (KeyCode::End, _) => Action::Bottom,
        (_, true) => return None,
        (KeyCode::Char(c), false) => match c {
            'Q' => Action::WriteQuit,
            'h' => Action::Help,
            'm' => Action::Mark,
            '>' => Action::NextMark,
            '<' => Action::PrevMark,
            'w' | 'W' => Action::ToggleWrap,
            'c' => Action::ToggleColumnMode,
            'C' => Action::ToggleAlternateRows,
            'G' => Action::ToggleLineNumbers,
            'F' => Action::ToggleFollow,
            '/' => Action::Search,
            '?' => Action::BackSearch,
            'n' => Action::NextMatch,
            'N' => Action::PrevMatch,
            ':' => Action::Goto,
            'H' => Action::Header,
            'd' => Action::Delimiter,
            't' => Action::TabWidth,
            ']' => Action::NextDoc,
            '[' => Action::PrevDoc,
            '0'..='9' => return c.to_digit(10).map(Action::Digit),
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Key names and descriptions, in the order the help screen lists them.
const BINDINGS: &[(&str, &str)] = &[
    ("Esc, q, Ctrl+c", "quit"),
    ("Q", "output screen and quit"),
    ("h", "display help screen"),
    ("Ctrl+l", "screen sync"),
    ("", ""),
    ("Enter, Down, j, Ctrl+n", "forward by one line"),
    ("Up, k, Ctrl+p", "backward by one line"),
    ("Home, g", "go to top of document"),
    ("End", "go to bottom of document"),
    ("PageDown, Space, Ctrl+v, Ctrl+f", "forward by page"),
    ("PageUp, b, Ctrl+b", "backward by page"),
    ("Ctrl+d", "forward a half page"),
    ("Ctrl+u", "backward a half page"),
    ("Left", "scroll to left"),
    ("Right", "scroll to right"),
    ("Ctrl+Left", "scroll left half screen"),
    ("Ctrl+Right", "scroll right half screen"),
    (":", "number of go to line"),
    ("m", "mark current position"),
    (">", "move to next marked position"),
    ("<", "move to previous marked position"),
    ("0-9", "repeat count for the next movement"),
    ("", ""),
    ("w, W", "wrap/nowrap toggle"),
    ("c", "column mode toggle"),
    ("C", "color to alternate rows toggle"),
    ("G", "line number toggle"),
    ("F", "follow mode toggle"),
    ("]", "next document"),
    ("[", "previous document"),
    ("", ""),
    ("/", "forward search mode"),
    ("?", "backward search mode"),
    ("n", "repeat forward search"),
    ("N", "repeat backward search"),
    ("", ""),
    ("H", "number of header lines"),
    ("d", "delimiter string"),
    ("t", "TAB width"),
];

/// Lines of the help document.
pub fn help_lines() -> Vec<String> {
    let key_width = BINDINGS.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut lines = vec![
        format!("{} key bindings", env!("CARGO_PKG_NAME")),
        String::new(),
    ];
    lines.extend(BINDINGS.iter().map(|(keys, desc)| {
        if keys.is_empty() {
            String::new()
        } else {
            format!("  [{keys}]{:pad$}  * {desc}", "", pad = key_width - keys.len())
        }
    }));
    lines
}
