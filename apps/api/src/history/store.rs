//! File-backed key/value slots in the data directory.
//!
//! Two slots exist: the provider API key (plain text) and the generation
//! history (a JSON array of artifacts). Each write replaces the whole slot.
//!
//! Loads are synchronous and only run at startup. Writes and removals run on
//! the blocking pool via `spawn_blocking` so an fsync never stalls a runtime worker.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::content::GeneratedContent;

pub const API_KEY_SLOT: &str = "api_key";
pub const HISTORY_SLOT: &str = "generation_history.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Blocking storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    /// Opens (and creates if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(slot)
    }

    pub fn load_api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .read_slot(API_KEY_SLOT)?
            .map(|raw| raw.trim().to_string())
            .filter(|key| !key.is_empty()))
    }

    pub async fn save_api_key(&self, key: &str) -> Result<(), StoreError> {
        let bytes = key.trim().as_bytes().to_vec();
        self.run_blocking(move |store| store.write_slot(API_KEY_SLOT, &bytes))
            .await
    }

    /// Reads the history slot. A slot that does not parse is logged and treated as empty.
    pub fn load_history(&self) -> Result<Vec<GeneratedContent>, StoreError> {
        let Some(raw) = self.read_slot(HISTORY_SLOT)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<GeneratedContent>>(&raw) {
            Ok(history) => Ok(history),
            Err(e) => {
                warn!(
                    "Ignoring malformed history slot {}: {e}",
                    self.slot_path(HISTORY_SLOT).display()
                );
                Ok(Vec::new())
            }
        }
    }

    pub async fn save_history(&self, history: &[GeneratedContent]) -> Result<(), StoreError> {
        let json = serde_json::to_vec(history)?;
        self.run_blocking(move |store| store.write_slot(HISTORY_SLOT, &json))
            .await?;
        debug!("Persisted {} history entries", history.len());
        Ok(())
    }

    pub async fn clear_history(&self) -> Result<(), StoreError> {
        self.run_blocking(|store| {
            let path = store.slot_path(HISTORY_SLOT);
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StoreError::Io { path, source }),
            }
        })
        .await
    }

    /// Runs a filesystem operation on the blocking pool with an owned copy of the store.
    async fn run_blocking<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&SlotStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || op(&store)).await?
    }

    fn read_slot(&self, slot: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Writes to a temp file in the same directory, then renames over the slot.
    fn write_slot(&self, slot: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.slot_path(slot);
        let io_err = |source: io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}
