//! Side effects that happen outside the model: clipboard and final output.

use std::io::{self, Write, stdout};

use base64::Engine;
use crossterm::event::DisableMouseCapture;
use crossterm::execute;

/// Undo terminal setup. Safe to call more than once.
pub fn teardown() {
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
}

/// Print `lines`, one per line, as the pager leaves.
///
/// # Errors
/// Returns any error writing to `out`.
pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Put `text` on the system clipboard, falling back to OSC 52.
///
/// # Errors
/// Returns any error writing the escape sequence to stdout.
pub fn copy_to_clipboard(text: &str) -> io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    let mut out = stdout();
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    if child.wait()?.success() {
        Ok(())
    } else {
        Err(io::Error::other("pbcopy failed"))
    }
}

/// Terminal escape asking the emulator to put `text` on the clipboard.
fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
