//! Bounded recent-search history.
//!
//! Most recent first, each query at most once, never longer than the cap.
//! The whole list is read and then overwritten on every update.

use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the serialized history.
pub const HISTORY_KEY: &str = "recentSearches";

/// Default number of remembered searches.
pub const DEFAULT_HISTORY_CAP: usize = 5;

/// Recent searches persisted through a key-value store.
pub struct RecentSearches<'s> {
    store: &'s dyn KeyValueStore,
    cap: usize,
    entries: Vec<String>,
}

impl<'s> RecentSearches<'s> {
    /// Load the history from `store`.
    ///
    /// Absent, unreadable or malformed data is logged and treated as an empty
    /// history.
    #[must_use]
    pub fn load(store: &'s dyn KeyValueStore, cap: usize) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(cap);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, key = HISTORY_KEY, "Malformed recent searches, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, key = HISTORY_KEY, "Could not read recent searches, starting empty");
                Vec::new()
            }
        };

        Self {
            store,
            cap,
            entries,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    /// Record a submitted query and persist the updated list.
    ///
    /// Blank queries are ignored. Any earlier occurrence of the exact same
    /// string is removed before the query is prepended.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be persisted. The in-memory
    /// list is updated either way.
    pub fn record(&mut self, query: &str) -> Result<(), StorageError> {
        if query.trim().is_empty() {
            return Ok(());
        }

        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.cap);
        debug!(query, len = self.entries.len(), "Recorded recent search");

        self.persist()
    }

    /// Forget every recent search.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored list cannot be removed.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&self.entries)
            .map_err(|e| StorageError::WriteError(format!("serialize {HISTORY_KEY}: {e}")))?;
        self.store.set(HISTORY_KEY, &serialized)
    }
}
