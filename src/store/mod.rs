//! Persistent favorites and watch history
//!
//! Two JSON-encoded collections behind an injected key-value storage. Every
//! mutation is a read-modify-write of the whole collection: the store is a
//! single-writer resource and the payloads are tiny. Reads fail soft: a
//! corrupt or unreadable payload logs a warning and lists as empty rather
//! than taking the app down.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DenError, DenResult};
use crate::models::{FavoriteEntry, HistoryEntry, MovieRecord};

mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub const FAVORITES_KEY: &str = "favorites";
pub const HISTORY_KEY: &str = "watch-history";

/// Watch history keeps at most this many entries, oldest dropped first
pub const HISTORY_CAP: usize = 50;

pub struct DenStore {
    storage: Box<dyn KeyValueStorage>,
}

impl DenStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Favorites in insertion order
    pub fn list_favorites(&self) -> Vec<FavoriteEntry> {
        self.load(FAVORITES_KEY)
    }

    /// Saves a movie unless an entry with the same (title, year) exists
    ///
    /// Returns `false` without mutating anything when the movie is already
    /// a favorite.
    pub fn add_favorite(&self, movie: &MovieRecord, genre_label: &str) -> DenResult<bool> {
        let mut favorites = self.list_favorites();
        if favorites.iter().any(|f| f.movie.same_movie(movie)) {
            return Ok(false);
        }
        favorites.push(FavoriteEntry::new(movie.clone(), genre_label));
        self.save(FAVORITES_KEY, &favorites)?;
        tracing::info!(title = %movie.title, year = %movie.year, "Favorite added");
        Ok(true)
    }

    /// Removes the favorite with the given id; silently does nothing if absent
    pub fn remove_favorite(&self, id: &str) -> DenResult<()> {
        let mut favorites = self.list_favorites();
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() == before {
            tracing::debug!(id = %id, "Remove requested for unknown favorite id");
            return Ok(());
        }
        self.save(FAVORITES_KEY, &favorites)
    }

    /// Looks up the stored favorite matching a movie's (title, year), if any
    pub fn find_favorite(&self, movie: &MovieRecord) -> Option<FavoriteEntry> {
        self.list_favorites()
            .into_iter()
            .find(|f| f.movie.same_movie(movie))
    }

    /// Watch history, most-recent-first
    pub fn list_history(&self) -> Vec<HistoryEntry> {
        self.load(HISTORY_KEY)
    }

    /// Records a viewing: dedup by (title, year), promote to front, cap at 50
    pub fn record_view(&self, movie: &MovieRecord, genre_label: &str) -> DenResult<()> {
        let mut history = self.list_history();
        history.retain(|h| !h.movie.same_movie(movie));
        history.insert(0, HistoryEntry::new(movie.clone(), genre_label));
        history.truncate(HISTORY_CAP);
        self.save(HISTORY_KEY, &history)
    }

    pub fn clear_favorites(&self) -> DenResult<()> {
        self.storage.remove(FAVORITES_KEY)
    }

    pub fn clear_history(&self) -> DenResult<()> {
        self.storage.remove(HISTORY_KEY)
    }

    /// Serializes the favorites collection for download
    ///
    /// Signals `NothingToExport` when the collection is empty instead of
    /// producing an empty document.
    pub fn export_favorites(&self) -> DenResult<String> {
        let favorites = self.list_favorites();
        if favorites.is_empty() {
            return Err(DenError::NothingToExport);
        }
        serde_json::to_string_pretty(&favorites)
            .map_err(|e| DenError::Storage(format!("serialize favorites: {}", e)))
    }

    /// Merges an exported favorites document back in, skipping duplicates
    ///
    /// Returns how many entries were actually added.
    pub fn import_favorites(&self, blob: &str) -> DenResult<usize> {
        let incoming: Vec<FavoriteEntry> = serde_json::from_str(blob)
            .map_err(|e| DenError::Parse(format!("favorites document: {}", e)))?;

        let mut favorites = self.list_favorites();
        let mut added = 0;
        for entry in incoming {
            if !favorites.iter().any(|f| f.movie.same_movie(&entry.movie)) {
                favorites.push(entry);
                added += 1;
            }
        }
        if added > 0 {
            self.save(FAVORITES_KEY, &favorites)?;
        }
        tracing::info!(added, "Favorites imported");
        Ok(added)
    }

    /// Loads a collection, degrading to empty on any read or decode failure
    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let payload = match self.storage.get(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Storage unreadable, listing as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&payload) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Corrupt collection payload, listing as empty");
                Vec::new()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> DenResult<()> {
        let payload = serde_json::to_string(items)
            .map_err(|e| DenError::Storage(format!("serialize {}: {}", key, e)))?;
        self.storage.set(key, &payload)
    }
}
