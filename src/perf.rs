//! Opt-in timing scopes and the render debug log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: LazyLock<Mutex<DebugLog>> = LazyLock::new(|| Mutex::new(DebugLog::new()));

/// Times a named region; reported on drop when timing is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(target: "lectio::perf", scope = self.name, elapsed_ms, "timing");
        log_event(self.name, format!("{elapsed_ms:.2} ms"));
    }
}

#[derive(Debug)]
struct DebugLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLog {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }
}

fn debug_log() -> MutexGuard<'static, DebugLog> {
    DEBUG_LOG
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Start writing debug events to `path`, or stop with `None`.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = debug_log();
    if let Some(path) = path {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "lectio render debug log start")?;
        writer.flush()?;
        log.start = Instant::now();
        log.writer = Some(writer);
    } else {
        log.writer = None;
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    debug_log().writer.is_some()
}

/// Append one event line to the debug log, if one is open.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut log = debug_log();
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = log.writer.as_mut() {
        let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {}", detail.as_ref());
        let _ = writer.flush();
    }
}
