// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

static LOG_FILE: OnceLock<Option<PathBuf>> = OnceLock::new();
static LOG_LOCK: Mutex<()> = Mutex::new(());
static VERBOSE: AtomicBool = AtomicBool::new(false);
static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Choose the sink once per process. `None` logs to stderr.
/// Later calls keep the first sink but may still raise verbosity.
pub fn init(file: Option<PathBuf>, verbose: bool) {
    start();
    if let Some(Some(parent)) = file.as_ref().map(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            let _ = fs::create_dir_all(parent);
        }
    }
    let _ = LOG_FILE.set(file);
    if verbose {
        VERBOSE.store(true, Ordering::Relaxed);
    }
}

pub fn debug_enabled() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Internal logging function
pub fn write_log(level: &str, msg: &str) {
    let elapsed = fmt_elapsed(start().elapsed().as_millis());
    let line = format!("[{elapsed}][{level}] {msg}\n");

    if let Ok(_guard) = LOG_LOCK.lock() {
        match LOG_FILE.get() {
            Some(Some(path)) => {
                if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                    let _ = file.write_all(line.as_bytes());
                }
            }
            _ => {
                let _ = std::io::stderr().write_all(line.as_bytes());
            }
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Debug-level logging, only with `--verbose`
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        if $crate::log::debug_enabled() {
            $crate::log::write_log("DEBUG", &format!($($arg)*))
        }
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}
