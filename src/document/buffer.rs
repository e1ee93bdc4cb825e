use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct BufferState {
    lines: Vec<String>,
    eof: bool,
}

/// Line storage shared between a reader thread and the event loop.
///
/// The reader only appends; everything else only reads. Readers may block on
/// [`LineBuffer::wait_for`] until enough lines have arrived.
#[derive(Debug, Default)]
pub struct LineBuffer {
    state: Mutex<BufferState>,
    grown: Condvar,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finished buffer holding `lines`.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            state: Mutex::new(BufferState { lines, eof: true }),
            grown: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BufferState> {
        // A panicking reader leaves the lines it already pushed intact.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of lines read so far.
    pub fn end_num(&self) -> usize {
        self.lock().lines.len()
    }

    /// Whether the source has been read to its end.
    pub fn is_eof(&self) -> bool {
        self.lock().eof
    }

    pub fn line(&self, n: usize) -> Option<String> {
        self.lock().lines.get(n).cloned()
    }

    pub(crate) fn push_lines(&self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        self.lock().lines.extend(lines);
        self.grown.notify_all();
    }

    pub(crate) fn finish(&self) {
        self.lock().eof = true;
        self.grown.notify_all();
    }

    /// Block until at least `n` lines are available, the source ends, or
    /// `timeout` passes. Returns the line count at that point.
    pub fn wait_for(&self, n: usize, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        while state.lines.len() < n && !state.eof {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            state = self
                .grown
                .wait_timeout(state, deadline - now)
                .map_or_else(|e| e.into_inner().0, |(guard, _)| guard);
        }
        state.lines.len()
    }
}
