// SPDX-License-Identifier: PMPL-1.0-or-later

//! Operation log
//!
//! Entries are kept newest-first and echoed to the console as they are
//! recorded. [`SyncLog::flush`] prepends one run block to
//! `TranslationSync.log` under the locale root, so the file reads newest
//! run first.

use crate::error::{Result, SyncError};
use chrono::{DateTime, Local};
use colored::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "TranslationSync.log";

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

fn timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub language: String,
    pub message: String,
}

impl LogEntry {
    pub fn render(&self) -> String {
        format!(
            "[{}] [{}] {}",
            timestamp(&self.timestamp),
            self.language,
            self.message
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyncLog {
    entries: Vec<LogEntry>,
    quiet: bool,
}

impl SyncLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that records without echoing to the console
    pub fn quiet() -> Self {
        Self {
            entries: Vec::new(),
            quiet: true,
        }
    }

    pub fn record(&mut self, language: &str, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Local::now(),
            language: language.to_string(),
            message: message.into(),
        };
        if !self.quiet {
            println!(
                "[{}] [{}] {}",
                timestamp(&entry.timestamp).dimmed(),
                entry.language.cyan(),
                entry.message
            );
        }
        self.entries.push(entry);
    }

    /// Entries, most recent first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render this run's block: a blank line, the run separator, then the
    /// entries newest-first, each on its own line.
    pub fn render_block(&self, started: &DateTime<Local>) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(format!("\n[{}] Sync Started...", timestamp(started)));
        lines.extend(self.entries().map(LogEntry::render));
        format!("\n{}", lines.join("\n"))
    }

    /// Prepend this run's block to `root/TranslationSync.log`.
    ///
    /// Does nothing and returns `None` when no entries were recorded or the
    /// root directory does not exist; a missing root is never created.
    pub fn flush(&self, root: &Path) -> Result<Option<PathBuf>> {
        if self.entries.is_empty() || !root.is_dir() {
            return Ok(None);
        }

        let path = root.join(LOG_FILE_NAME);
        let previous = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(SyncError::io(&path, e)),
        };

        let mut content = self.render_block(&Local::now()).into_bytes();
        content.extend_from_slice(&previous);
        fs::write(&path, content).map_err(|e| SyncError::io(&path, e))?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn entries_are_newest_first() {
        let mut log = SyncLog::quiet();
        log.record("en", "first");
        log.record("tr", "second");
        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn entry_renders_language_tag() {
        let mut log = SyncLog::quiet();
        log.record("tr", "Writing over key [greeting]");
        let line = log.entries().next().unwrap().render();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] [tr] Writing over key [greeting]"));
    }

    #[test]
    fn empty_log_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let written = SyncLog::quiet().flush(dir.path()).unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn flush_prepends_to_existing_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "\n\n[old] Sync Started...\nold line").unwrap();

        let mut log = SyncLog::quiet();
        log.record("en", "a");
        log.record("tr", "b");
        log.flush(dir.path()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("\n\n["));
        assert!(content.ends_with("\n\n[old] Sync Started...\nold line"));

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "");
        assert!(lines[2].ends_with("] Sync Started..."));
        assert!(lines[3].ends_with("[tr] b"));
        assert!(lines[4].ends_with("[en] a"));
    }

    #[test]
    fn flush_skips_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("wrong/place");
        let mut log = SyncLog::quiet();
        log.record("en", "Main language folder not found");

        let written = log.flush(&root).unwrap();
        assert!(written.is_none());
        assert!(!root.exists());
    }

    #[test]
    fn flush_keeps_non_utf8_previous_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let old: &[u8] = b"\nold \xff\xfe line";
        fs::write(&path, old).unwrap();

        let mut log = SyncLog::quiet();
        log.record("tr", "new");
        let written = log.flush(dir.path()).unwrap();
        assert_eq!(written, Some(path.clone()));

        let content = fs::read(&path).unwrap();
        assert!(content.ends_with(old));
        let head = String::from_utf8_lossy(&content[..content.len() - old.len()]).into_owned();
        assert!(head.contains("Sync Started..."));
        assert!(head.ends_with("[tr] new"));
    }
}
