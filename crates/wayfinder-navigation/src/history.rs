//! Browser history seam
//!
//! The router never reads a global location. It asks a `History` for the
//! current path and writes new paths through it.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub trait History: Send + Sync {
    /// Path part of the current location
    fn current_path(&self) -> String;

    /// Add an entry without reloading (link navigation)
    fn push_state(&self, path: &str);

    /// Overwrite the current entry without reloading (redirects)
    fn replace_state(&self, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Push,
    Replace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub path: String,
    pub kind: HistoryKind,
    pub recorded_at: DateTime<Utc>,
}

/// In-process history: the current path plus a log of every write
pub struct MemoryHistory {
    current: Arc<RwLock<String>>,
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial_path.into())),
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Every push/replace so far, oldest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().clone()
    }

    pub fn count(&self, kind: HistoryKind) -> usize {
        self.entries.read().iter().filter(|e| e.kind == kind).count()
    }

    fn record(&self, path: &str, kind: HistoryKind) {
        *self.current.write() = path.to_string();
        self.entries.write().push(HistoryEntry {
            path: path.to_string(),
            kind,
            recorded_at: Utc::now(),
        });

        tracing::debug!(path = %path, kind = ?kind, "History updated");
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Clone for MemoryHistory {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            entries: Arc::clone(&self.entries),
        }
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.current.read().clone()
    }

    fn push_state(&self, path: &str) {
        self.record(path, HistoryKind::Push);
    }

    fn replace_state(&self, path: &str) {
        self.record(path, HistoryKind::Replace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_history() {
        let history = MemoryHistory::new("/start");
        assert_eq!(history.current_path(), "/start");
        assert!(history.entries().is_empty());

        history.push_state("/cards/");
        history.replace_state("/patients/");
        assert_eq!(history.current_path(), "/patients/");

        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "/cards/");
        assert_eq!(entries[0].kind, HistoryKind::Push);
        assert_eq!(entries[1].kind, HistoryKind::Replace);
        assert_eq!(history.count(HistoryKind::Replace), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let history = MemoryHistory::default();
        let other = history.clone();
        other.push_state("/x");
        assert_eq!(history.current_path(), "/x");
    }
}
