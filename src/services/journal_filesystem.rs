//! Filesystem-backed journal store.
//!
//! Each collection is one pretty-printed JSON file under the data
//! directory. A missing file reads as the empty collection; a file that
//! exists but does not parse is a fatal [`AppError::StoreCorrupted`] so
//! saved analyses are never silently discarded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{AppError, CurrentAnalysis, JournalEntry, Transcript};
use crate::ports::JournalStore;

const JOURNAL_FILE: &str = "journal.json";
const CURRENT_FILE: &str = "current.json";
const CHAT_FILE: &str = "chat.json";

/// Filesystem-based journal store implementation.
#[derive(Debug, Clone)]
pub struct FilesystemJournalStore {
    root: PathBuf,
}

impl FilesystemJournalStore {
    /// Create a store rooted at the given data directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the default data directory: `DERMALENS_DATA_DIR`, else the
    /// platform data dir, else a dot-directory in the home directory.
    pub fn default_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("DERMALENS_DATA_DIR") {
            return PathBuf::from(dir);
        }
        if let Some(data) = dirs::data_dir() {
            return data.join("dermalens");
        }
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".dermalens")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_or<T: DeserializeOwned>(&self, file: &str, empty: T) -> Result<T, AppError> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(empty);
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| AppError::StoreCorrupted {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), AppError> {
        fs::create_dir_all(&self.root)?;
        let raw = serde_json::to_string_pretty(value).map_err(|e| AppError::StoreCorrupted {
            path: file.to_string(),
            reason: e.to_string(),
        })?;
        fs::write(self.root.join(file), raw)?;
        Ok(())
    }
}

impl JournalStore for FilesystemJournalStore {
    fn load_journal(&self) -> Result<Vec<JournalEntry>, AppError> {
        self.read_or(JOURNAL_FILE, Vec::new())
    }

    fn save_journal(&self, entries: &[JournalEntry]) -> Result<(), AppError> {
        self.write(JOURNAL_FILE, &entries)
    }

    fn load_current(&self) -> Result<Option<CurrentAnalysis>, AppError> {
        self.read_or(CURRENT_FILE, None)
    }

    fn save_current(&self, current: &CurrentAnalysis) -> Result<(), AppError> {
        self.write(CURRENT_FILE, current)
    }

    fn load_transcript(&self) -> Result<Transcript, AppError> {
        self.read_or(CHAT_FILE, Transcript::new())
    }

    fn save_transcript(&self, transcript: &Transcript) -> Result<(), AppError> {
        self.write(CHAT_FILE, transcript)
    }

    fn clear_transcript(&self) -> Result<(), AppError> {
        let path = self.root.join(CHAT_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
