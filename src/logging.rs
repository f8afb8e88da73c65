//! Activity log
//!
//! An append-only, line-oriented record of what the user did and how storage
//! responded. One line per event:
//!
//! ```text
//! [2026-01-31 14:02:11] [SUCCESS] json save complete | details: contacts: 3
//! ```
//!
//! The log is an explicit instance handed to whoever needs it. It is separate
//! from `tracing` diagnostics, which go to stderr; every entry is mirrored to
//! `tracing` at debug level under the `activity` target.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, TimeDelta};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::Contact;
use crate::error::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// `[` + `YYYY-MM-DD HH:MM:SS`
const TIMESTAMP_END: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
    Debug,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Success => "SUCCESS",
            Self::Debug => "DEBUG",
        }
    }

    fn tag(self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-level line counts, as reported by [`ActivityLog::stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub total: usize,
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub success: usize,
    pub debug: usize,
}

pub struct ActivityLog {
    path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl ActivityLog {
    /// Log appending to `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lock: Mutex::new(()),
        }
    }

    /// Log that accepts every call and writes nothing.
    pub const fn disabled() -> Self {
        Self {
            path: None,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn initialize(&self) {
        self.info(
            "=== contact manager started ===",
            Some(&format!("version {}", env!("CARGO_PKG_VERSION"))),
        );
    }

    pub fn shutdown(&self) {
        self.info("=== contact manager stopped ===", Some("session ended"));
    }

    /// Append one entry. Failures to write are reported through `tracing`
    /// and otherwise ignored.
    pub fn record(&self, level: LogLevel, message: &str, details: Option<&str>) {
        debug!(target: "activity", level = %level, details = details.unwrap_or(""), "{message}");

        let Some(path) = &self.path else {
            return;
        };

        let mut line = format!(
            "[{}] {} {message}",
            Local::now().format(TIMESTAMP_FORMAT),
            level.tag()
        );
        if let Some(details) = details.filter(|d| !d.is_empty()) {
            line.push_str(" | details: ");
            line.push_str(details);
        }

        let _guard = self.lock.lock();
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(err) = written {
            warn!(path = %path.display(), error = %err, "activity log write failed");
        }
    }

    pub fn info(&self, message: &str, details: Option<&str>) {
        self.record(LogLevel::Info, message, details);
    }

    pub fn warning(&self, message: &str, details: Option<&str>) {
        self.record(LogLevel::Warning, message, details);
    }

    pub fn error(&self, message: &str, details: Option<&str>) {
        self.record(LogLevel::Error, message, details);
    }

    pub fn success(&self, message: &str, details: Option<&str>) {
        self.record(LogLevel::Success, message, details);
    }

    pub fn debug(&self, message: &str, details: Option<&str>) {
        self.record(LogLevel::Debug, message, details);
    }

    /// Entry for a user action on a single contact.
    pub fn contact_action(&self, action: &str, contact: &Contact) {
        self.info(
            &format!("contact {action}"),
            Some(&format!("{contact} | id: {}", contact.id)),
        );
    }

    /// Entry for an operation that failed.
    pub fn failure(&self, context: &str, err: &dyn std::error::Error) {
        self.error(&format!("failure in {context}"), Some(&err.to_string()));
    }

    /// The last `count` lines, oldest first. Empty when there is no log yet.
    pub fn recent(&self, count: usize) -> Result<Vec<String>> {
        let lines = self.read_lines()?;
        let start = lines.len().saturating_sub(count);
        Ok(lines[start..].to_vec())
    }

    pub fn stats(&self) -> Result<LogStats> {
        let Some(path) = &self.path else {
            return Ok(LogStats::default());
        };
        let lines = self.read_lines()?;
        let size_bytes = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        let count = |level: LogLevel| {
            let tag = level.tag();
            lines.iter().filter(|line| entry_level_is(line, &tag)).count()
        };

        Ok(LogStats {
            path: path.clone(),
            size_bytes,
            total: lines.len(),
            info: count(LogLevel::Info),
            warning: count(LogLevel::Warning),
            error: count(LogLevel::Error),
            success: count(LogLevel::Success),
            debug: count(LogLevel::Debug),
        })
    }

    /// Drop entries older than `days_to_keep` days. Lines without a readable
    /// timestamp are kept. Returns the number of lines removed.
    pub fn cleanup(&self, days_to_keep: u32) -> Result<usize> {
        let Some(path) = &self.path else {
            return Ok(0);
        };
        if !path.exists() {
            return Ok(0);
        }

        let cutoff = TimeDelta::try_days(i64::from(days_to_keep))
            .and_then(|keep| Local::now().naive_local().checked_sub_signed(keep));

        let removed = {
            let _guard = self.lock.lock();
            let raw = fs::read_to_string(path)?;
            let total = raw.lines().count();
            let kept: Vec<&str> = raw
                .lines()
                .filter(|line| match (cutoff, entry_timestamp(line)) {
                    (Some(cutoff), Some(at)) => at >= cutoff,
                    _ => true,
                })
                .collect();
            let mut payload = kept.join("\n");
            if !payload.is_empty() {
                payload.push('\n');
            }
            fs::write(path, payload)?;
            total - kept.len()
        };

        self.info(
            "log cleanup complete",
            Some(&format!(
                "removed {removed} entries older than {days_to_keep} days"
            )),
        );
        Ok(removed)
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }
        let _guard = self.lock.lock();
        Ok(fs::read_to_string(path)?
            .lines()
            .map(str::to_string)
            .collect())
    }
}

/// The level tag sits right after the timestamp; text further on is user data.
fn entry_level_is(line: &str, tag: &str) -> bool {
    line.get(TIMESTAMP_END + 2..)
        .is_some_and(|rest| rest.starts_with(tag))
}

fn entry_timestamp(line: &str) -> Option<NaiveDateTime> {
    let stamp = line.get(1..TIMESTAMP_END)?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}
