//! Logging bridge for listening-trainer.
//!
//! Routes every `log::info!()` etc. from all workspace crates to
//! `<temp dir>/listening_trainer_debug.log`. When `RUST_LOG` is set the
//! output is mirrored to stderr as well.
//!
//! The level is chosen from, in order of precedence:
//! - the explicit level passed to [`init`]
//! - `RUST_LOG` (`error`, `warn`, `info`, `debug`, `trace`, `off`)
//! - `DEBUG_LEVEL` (0 = off, 1 = errors, 2 = info, 3 = debug, 4 = trace)
//!
//! With none of these set, logging is off.

use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the log file inside the temp directory.
pub const LOG_FILE_NAME: &str = "listening_trainer_debug.log";

/// Map a `DEBUG_LEVEL` value onto a level filter.
pub fn level_from_debug_level(value: &str) -> LevelFilter {
    match value.trim().parse::<u8>() {
        Ok(1) => LevelFilter::Error,
        Ok(2) => LevelFilter::Info,
        Ok(3) => LevelFilter::Debug,
        Ok(4) => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Resolve the effective level from an explicit override and the environment.
pub fn resolve_level(
    explicit: Option<LevelFilter>,
    rust_log: Option<&str>,
    debug_level: Option<&str>,
) -> LevelFilter {
    if let Some(level) = explicit {
        return level;
    }
    if let Some(level) = rust_log.and_then(|v| LevelFilter::from_str(v.trim()).ok()) {
        return level;
    }
    debug_level
        .map(level_from_debug_level)
        .unwrap_or(LevelFilter::Off)
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

struct LogBridge {
    level: LevelFilter,
    file: Option<Mutex<File>>,
    mirror_stderr: bool,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the logging bridge. Calling it again is a no-op that returns the
/// level chosen by the first call.
pub fn init(explicit: Option<LevelFilter>) -> Result<LevelFilter> {
    if let Some(bridge) = BRIDGE.get() {
        return Ok(bridge.level);
    }

    let rust_log = std::env::var("RUST_LOG").ok();
    let debug_level = std::env::var("DEBUG_LEVEL").ok();
    let level = resolve_level(explicit, rust_log.as_deref(), debug_level.as_deref());

    let file = if level == LevelFilter::Off {
        None
    } else {
        let path = log_path();
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Some(Mutex::new(file))
    };

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        level,
        file,
        mirror_stderr: rust_log.is_some(),
    });
    log::set_logger(bridge).map_err(|e| anyhow!("A logger is already installed: {e}"))?;
    log::set_max_level(bridge.level);

    log::info!("listening-trainer logging started (level={})", bridge.level);
    Ok(bridge.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_level_mapping() {
        assert_eq!(level_from_debug_level("0"), LevelFilter::Off);
        assert_eq!(level_from_debug_level("1"), LevelFilter::Error);
        assert_eq!(level_from_debug_level(" 2 "), LevelFilter::Info);
        assert_eq!(level_from_debug_level("3"), LevelFilter::Debug);
        assert_eq!(level_from_debug_level("4"), LevelFilter::Trace);
        assert_eq!(level_from_debug_level("loud"), LevelFilter::Off);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            resolve_level(Some(LevelFilter::Warn), Some("trace"), Some("4")),
            LevelFilter::Warn
        );
        assert_eq!(resolve_level(None, Some("debug"), Some("1")), LevelFilter::Debug);
        assert_eq!(resolve_level(None, Some("nonsense"), Some("1")), LevelFilter::Error);
        assert_eq!(resolve_level(None, None, None), LevelFilter::Off);
    }

    #[test]
    fn test_log_path() {
        assert!(log_path().ends_with(LOG_FILE_NAME));
    }
}
