//! Background threads that feed the event queue.
//!
//! None of them touch pager state: they only send [`Message`]s. The signal
//! listener is the one exception to going through the queue, since it tears
//! the terminal down and exits the process.

use std::io;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::Message;
use crate::document::LineBuffer;

/// How often the ticker refreshes while input is still arriving.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Forward terminal input as messages until the queue closes.
pub fn spawn_input_reader(tx: Sender<Message>) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            loop {
                let msg = match event::read() {
                    Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => Message::Key(key),
                    Ok(Event::Mouse(mouse)) => Message::Mouse(mouse),
                    Ok(Event::Resize(width, height)) => Message::Resize(width, height),
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::warn!(%err, "terminal input failed");
                        return;
                    }
                };
                if tx.send(msg).is_err() {
                    return;
                }
            }
        })
}

/// Send a tick every `interval` until every buffer is fully read.
///
/// The last tick goes out after the final buffer reaches its end, so the
/// screen catches the tail of the input.
pub fn spawn_ticker(
    tx: Sender<Message>,
    buffers: Vec<Arc<LineBuffer>>,
    interval: Duration,
) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("ticker".to_string())
        .spawn(move || {
            let ticks = crossbeam_channel::tick(interval);
            while ticks.recv().is_ok() {
                if tx.send(Message::Tick).is_err() {
                    return;
                }
                if buffers.iter().all(|b| b.is_eof()) {
                    tracing::debug!("all input read, ticker stopped");
                    return;
                }
            }
        })
}

/// Restore the terminal and exit on SIGINT, SIGTERM or SIGHUP.
///
/// `teardown` must only undo terminal setup.
#[cfg(unix)]
pub fn spawn_signal_listener(teardown: fn()) -> io::Result<JoinHandle<()>> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    std::thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::info!(signal, "terminating on signal");
                teardown();
                std::process::exit(1);
            }
        })
}
