use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::buffer::LineBuffer;
use crate::watcher::GrowthWatcher;

/// Lines handed to the buffer at once while input is still streaming in.
const BATCH_LINES: usize = 4096;

/// How long a follow reader sleeps before re-checking a quiet file.
const FOLLOW_RECHECK: Duration = Duration::from_secs(1);

/// Spawn a thread that reads `source` into `buffer` until end of input.
pub fn spawn_reader<R>(name: &str, source: R, buffer: Arc<LineBuffer>) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    let label = name.to_string();
    std::thread::Builder::new()
        .name(format!("reader:{label}"))
        .spawn(move || {
            let mut reader = BufReader::new(source);
            let mut pending = Vec::new();
            if let Err(err) = read_available(&mut reader, &buffer, &mut pending) {
                tracing::warn!(source = %label, %err, "read failed");
            }
            flush_partial(&buffer, &mut pending);
            buffer.finish();
            tracing::debug!(source = %label, lines = buffer.end_num(), "reader finished");
        })
}

/// Spawn a thread that reads `path` and keeps following it as it grows.
///
/// The buffer is never marked finished: a followed file has no end.
pub fn spawn_follower(path: &Path, buffer: Arc<LineBuffer>) -> io::Result<JoinHandle<()>> {
    let file = File::open(path)?;
    let path: PathBuf = path.to_path_buf();
    std::thread::Builder::new()
        .name(format!("follow:{}", path.display()))
        .spawn(move || {
            let watcher = match GrowthWatcher::new(&path) {
                Ok(w) => Some(w),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "watch unavailable, polling instead");
                    None
                }
            };
            let mut reader = BufReader::new(file);
            let mut pending = Vec::new();
            loop {
                if let Err(err) = read_available(&mut reader, &buffer, &mut pending) {
                    tracing::warn!(path = %path.display(), %err, "follow read failed");
                    flush_partial(&buffer, &mut pending);
                    buffer.finish();
                    return;
                }
                match &watcher {
                    Some(w) => {
                        w.wait_for_change(FOLLOW_RECHECK);
                    }
                    None => std::thread::sleep(FOLLOW_RECHECK),
                }
            }
        })
}

/// Read every complete line currently available.
///
/// A trailing fragment without a newline stays in `pending` so a line written
/// in two pieces is not split.
fn read_available<R: Read>(
    reader: &mut BufReader<R>,
    buffer: &LineBuffer,
    pending: &mut Vec<u8>,
) -> io::Result<()> {
    let mut batch = Vec::new();
    loop {
        let n = reader.read_until(b'\n', pending)?;
        if n == 0 {
            break;
        }
        if pending.last() != Some(&b'\n') {
            // Reached the current end mid-line.
            break;
        }
        batch.push(decode_line(pending));
        pending.clear();
        if batch.len() >= BATCH_LINES || reader.buffer().is_empty() {
            buffer.push_lines(std::mem::take(&mut batch));
        }
    }
    buffer.push_lines(batch);
    Ok(())
}

fn flush_partial(buffer: &LineBuffer, pending: &mut Vec<u8>) {
    if !pending.is_empty() {
        buffer.push_lines(vec![decode_line(pending)]);
        pending.clear();
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
