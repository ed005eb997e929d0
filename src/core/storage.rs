//! # Key-Value Storage
//!
//! A tiny durable slot store at `~/.pokedex/storage.json`, used as the last
//! tier of the share chain.
//!
//! The file is a JSON object of `key → { value, updated_at }`. Writes go
//! through `.tmp` + `rename()` so a crash never leaves a half-written file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Key under which the last shared summary is kept.
pub const LAST_SHARED_KEY: &str = "lastSharedPokemon";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoredEntry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.pokedex/storage.json`, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pokedex").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value stored under `key`. A missing file reads as empty.
    pub fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.load()?.remove(key).map(|entry| entry.value))
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// An unreadable (corrupt) file is replaced rather than blocking the write.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Discarding corrupt storage file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &entries)?;
        info!("Stored {} bytes under '{}' in {}", value.len(), key, self.path.display());
        Ok(())
    }

    fn load(&self) -> io::Result<BTreeMap<String, StoredEntry>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No storage file at {}, starting empty", self.path.display());
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
