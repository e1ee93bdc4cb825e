use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, LoopControl, Message, Model, effects, producers, update};

/// How long `-F` waits for input before deciding it does not fit.
const ONE_SCREEN_WAIT: Duration = Duration::from_secs(2);

/// Run the dispatch loop: lay out, draw, then block for the next message.
///
/// Returns when a quit message is accepted or every sender is gone.
///
/// # Errors
///
/// Returns the first error from `draw`.
pub fn dispatch_loop<F>(model: &mut Model, events: &Receiver<Message>, mut draw: F) -> Result<()>
where
    F: FnMut(&mut Model) -> Result<()>,
{
    loop {
        model.layout();
        draw(model)?;
        let Ok(msg) = events.recv() else {
            tracing::debug!("event queue closed");
            return Ok(());
        };
        tracing::trace!(kind = msg.kind(), "dispatch");
        if update(model, msg) == LoopControl::Break {
            return Ok(());
        }
    }
}

impl App {
    /// Run the pager until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or drawn to, or a
    /// producer thread cannot be started.
    pub fn run(self) -> Result<()> {
        let Self {
            docs,
            theme,
            case_sensitive,
            quit_if_one_screen,
            exit_write,
            tx,
            rx,
        } = self;

        let size = crossterm::terminal::size().context("Failed to read terminal size")?;
        let buffers: Vec<_> = docs.iter().map(crate::document::Document::buffer).collect();
        let mut model = Model::new(docs, size)
            .with_theme(theme)
            .with_case_sensitive(case_sensitive)
            .with_ticks(tx.clone());

        if quit_if_one_screen && fits_on_one_screen(&mut model) {
            let doc = model.doc();
            let lines: Vec<String> = (0..doc.end_num()).filter_map(|n| doc.raw_line(n)).collect();
            effects::write_lines(&mut stdout().lock(), &lines)?;
            return Ok(());
        }

        #[cfg(unix)]
        producers::spawn_signal_listener(effects::teardown).context("Failed to install signal handlers")?;
        producers::spawn_ticker(tx.clone(), buffers, producers::TICK_INTERVAL)
            .context("Failed to start ticker")?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: tailview requires an interactive terminal")?;
        let result = execute!(stdout(), EnableMouseCapture)
            .context("Failed to enable mouse capture")
            .and_then(|()| producers::spawn_input_reader(tx).context("Failed to start input reader"))
            .and_then(|_| {
                let size = terminal.size()?;
                model.resize(size.width, size.height);
                dispatch_loop(&mut model, &rx, |model| draw(&mut terminal, model))
            });
        effects::teardown();
        result?;

        if model.after_write || exit_write {
            model.layout();
            let lines = model.screen_text();
            effects::write_lines(&mut stdout().lock(), &lines)?;
        }
        Ok(())
    }
}

/// Flush pending side effects, then paint one frame.
fn draw(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
    if let Some(text) = model.clipboard.take()
        && let Err(err) = effects::copy_to_clipboard(&text)
    {
        model.set_message(format!("Copy failed: {err}"));
    }
    if std::mem::take(&mut model.full_redraw) {
        terminal.clear()?;
    }
    terminal.draw(|frame| crate::ui::render(model, frame))?;
    Ok(())
}

/// Wait briefly for the first document to finish, then check whether it fits.
fn fits_on_one_screen(model: &mut Model) -> bool {
    let buffer = model.doc().buffer();
    let limit = usize::from(model.viewport.height()) + 1;
    buffer.wait_for(limit, ONE_SCREEN_WAIT);
    buffer.is_eof() && model.contents_small()
}
