//! Command history: a capped, file-backed log of past translations.
//!
//! Entries are appended oldest-first to `history.json` and read back
//! newest-first. Persistence is best effort: a history that cannot be read is
//! treated as empty, and a failed write is logged and otherwise ignored.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const HISTORY_FILE: &str = "history.json";

/// Maximum number of entries kept on disk.
pub const MAX_HISTORY_ENTRIES: usize = 1000;

/// One translated query and what became of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(with = "crate::utils::timestamp")]
    pub timestamp: DateTime<Local>,
    pub query: String,
    pub command: String,
    pub executed: bool,
    /// Exit status of the command; `None` when it was not executed.
    pub exit_code: Option<i32>,
}

/// File-backed command history.
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Create a history log persisting to `<dir>/history.json`
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(HISTORY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a translation, dropping the oldest entries beyond
    /// [`MAX_HISTORY_ENTRIES`].
    pub fn append(&self, query: &str, command: &str, executed: bool, exit_code: Option<i32>) {
        let mut entries = self.load();

        entries.push(HistoryEntry {
            timestamp: Local::now(),
            query: query.to_string(),
            command: command.to_string(),
            executed,
            exit_code,
        });

        if entries.len() > MAX_HISTORY_ENTRIES {
            let excess = entries.len() - MAX_HISTORY_ENTRIES;
            entries = entries.split_off(excess);
        }

        self.save(&entries);
    }

    /// Entries newest-first, capped to `limit` when given.
    pub fn list(&self, limit: Option<usize>) -> Vec<HistoryEntry> {
        let entries = self.load().into_iter().rev();

        match limit {
            Some(limit) => entries.take(limit).collect(),
            None => entries.collect(),
        }
    }

    /// Entry at `index`, counting from the newest (0) backwards.
    pub fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.list(None).into_iter().nth(index)
    }

    /// Delete the persisted history.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("History cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }

    fn load(&self) -> Vec<HistoryEntry> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable history {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn read_entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let raw: Vec<serde_json::Value> = serde_json::from_str(&contents)?;

        Ok(raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<HistoryEntry>(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Discarding invalid history entry: {}", e);
                    None
                }
            })
            .collect())
    }

    fn save(&self, entries: &[HistoryEntry]) {
        if let Err(e) = self.write_entries(entries) {
            warn!("Failed to write history {}: {}", self.path.display(), e);
        }
    }

    fn write_entries(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}
