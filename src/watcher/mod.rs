//! Growth notifications for followed files.
//!
//! Uses the notify crate so the follow reader can sleep until the file it
//! tails is written to, instead of polling.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches a single file and reports when it may have grown.
pub struct GrowthWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
}

impl GrowthWatcher {
    /// Create a watcher for `path`.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the path cannot be watched.
    pub fn new(path: impl AsRef<Path>) -> notify::Result<Self> {
        // Event paths from the OS are canonical; match them against ours.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
        })
    }

    /// The canonical path of the file being watched.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Block until the file changes or `timeout` passes.
    ///
    /// Returns true when a relevant change was seen. A timeout also lets the
    /// caller re-check the file, since some backends coalesce or drop events.
    pub fn wait_for_change(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => {
                let mut relevant = self.accept(first);
                // Drain the burst a single write usually produces.
                while let Ok(next) = self.rx.try_recv() {
                    relevant |= self.accept(next);
                }
                relevant
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!(path = %self.target_path.display(), "file watcher disconnected");
                false
            }
        }
    }

    fn accept(&self, event: notify::Result<Event>) -> bool {
        match event {
            Ok(ev) if matches!(ev.kind, EventKind::Access(_)) => false,
            Ok(ev) => {
                let relevant = self.is_relevant(&ev);
                if !relevant {
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "watcher.irrelevant");
                }
                relevant
            }
            Err(err) => {
                tracing::debug!(%err, "watcher.error");
                false
            }
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
