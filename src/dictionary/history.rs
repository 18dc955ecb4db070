//! Persistent record of looked-up words.
//!
//! The store is a small JSON file holding one record per word. It only
//! feeds highlighting and the `history` command, so read and write failures
//! are logged and otherwise ignored.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A looked-up word and when it was last looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub word: String,
    pub looked_up_at: DateTime<Utc>,
}

/// JSON file store of looked-up words.
#[derive(Debug, Clone, Default)]
pub struct History {
    path: Option<PathBuf>,
}

impl History {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        History {
            path: Some(path.into()),
        }
    }

    /// A store that remembers nothing.
    pub fn disabled() -> Self {
        History { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Every record, oldest first. Unreadable stores read as empty.
    pub fn records(&self) -> Vec<HistoryRecord> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        match read_records(path) {
            Ok(records) => records,
            Err(e) => {
                warn!("ignoring unreadable history {}: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// The `n` most recently looked-up words, newest first.
    pub fn recent(&self, n: usize) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }
        let mut records = self.records();
        records.sort_by_key(|record| record.looked_up_at);
        records.into_iter().rev().take(n).map(|record| record.word).collect()
    }

    /// Record a lookup of `word` now.
    pub fn record(&self, word: &str) {
        if let Err(e) = self.record_at(word, Utc::now()) {
            warn!("failed to save {word:?} to history: {e}");
        }
    }

    /// Record a lookup of `word` at `at`, refreshing an existing record.
    pub fn record_at(&self, word: &str, at: DateTime<Utc>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Ok(());
        }

        let mut records = read_records(path).unwrap_or_else(|e| {
            warn!("replacing unreadable history {}: {e}", path.display());
            Vec::new()
        });
        records.retain(|record| record.word != word);
        records.push(HistoryRecord {
            word,
            looked_up_at: at,
        });

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(&records)?)?;
        debug!("history now holds {} words", records.len());
        Ok(())
    }
}

fn read_records(path: &Path) -> Result<Vec<HistoryRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read(path)?;
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&data)?)
}
