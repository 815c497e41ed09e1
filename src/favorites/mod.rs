use chrono::Utc;
use fs_err as fs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::wire::{Format, Length, Vibe};

/// Name kept from the browser storage key the web client used.
pub const DEFAULT_FILE: &str = "neurosong-favorites.json";

const ID_PREFIX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedVerse {
    pub id: String,
    pub verse: String,
    pub prompt: String,
    pub vibe: Vibe,
    pub format: Format,
    pub length: Length,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("favorites file i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("favorites encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// `{timestamp}-{first 20 chars with whitespace replaced by '-'}`.
/// Two saves of the same verse in the same millisecond collide.
pub fn generate_verse_id(verse: &str, timestamp_ms: i64) -> String {
    let prefix: String = verse
        .chars()
        .take(ID_PREFIX_CHARS)
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("{timestamp_ms}-{prefix}")
}

/// JSON-array file of saved verses, newest first.
///
/// Read-modify-write cycles are serialized inside this process only.
pub struct FavoritesStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Result<Vec<SavedVerse>, StoreError> {
        let _guard = self.lock.lock();
        self.read_all()
    }

    /// Prepends `verse`.
    pub fn save(&self, verse: SavedVerse) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut all = self.read_all()?;
        info!(id = %verse.id, "saving favorite");
        all.insert(0, verse);
        self.write_all(&all)
    }

    /// Builds a record stamped with the current time and saves it.
    pub fn add(
        &self,
        verse: &str,
        prompt: &str,
        vibe: Vibe,
        format: Format,
        length: Length,
    ) -> Result<SavedVerse, StoreError> {
        let timestamp = Utc::now().timestamp_millis();
        let record = SavedVerse {
            id: generate_verse_id(verse, timestamp),
            verse: verse.to_string(),
            prompt: prompt.to_string(),
            vibe,
            format,
            length,
            timestamp,
        };
        self.save(record.clone())?;
        Ok(record)
    }

    /// Returns whether a record was removed. Unknown ids are a no-op.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock();
        let mut all = self.read_all()?;
        let before = all.len();
        all.retain(|fav| fav.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.write_all(&all)?;
        info!(id, "removed favorite");
        Ok(true)
    }

    pub fn find_by_verse(&self, verse: &str) -> Result<Option<SavedVerse>, StoreError> {
        Ok(self.list()?.into_iter().find(|fav| fav.verse == verse))
    }

    pub fn is_favorite(&self, verse: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_verse(verse)?.is_some())
    }

    fn read_all(&self) -> Result<Vec<SavedVerse>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&raw) {
            Ok(all) => Ok(all),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable favorites file, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, all: &[SavedVerse]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(all)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
