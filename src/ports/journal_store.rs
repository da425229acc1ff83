//! Persisted collection store port.
//!
//! Collections are read and rewritten wholesale per mutation: load the full
//! record, modify in memory, save the full record back. There is no partial
//! update and no cross-process locking.

use std::sync::Mutex;

use crate::domain::{AppError, CurrentAnalysis, JournalEntry, Transcript};

/// Port for the client-side persisted collections: the journal, the
/// current-analysis record, and the consultation transcript.
pub trait JournalStore {
    fn load_journal(&self) -> Result<Vec<JournalEntry>, AppError>;
    fn save_journal(&self, entries: &[JournalEntry]) -> Result<(), AppError>;

    fn load_current(&self) -> Result<Option<CurrentAnalysis>, AppError>;
    fn save_current(&self, current: &CurrentAnalysis) -> Result<(), AppError>;

    fn load_transcript(&self) -> Result<Transcript, AppError>;
    fn save_transcript(&self, transcript: &Transcript) -> Result<(), AppError>;
    fn clear_transcript(&self) -> Result<(), AppError>;
}

/// In-memory store for testing without a filesystem.
#[derive(Default)]
pub struct MemoryJournalStore {
    journal: Mutex<Vec<JournalEntry>>,
    current: Mutex<Option<CurrentAnalysis>>,
    transcript: Mutex<Transcript>,
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JournalStore for MemoryJournalStore {
    fn load_journal(&self) -> Result<Vec<JournalEntry>, AppError> {
        Ok(self.journal.lock().unwrap().clone())
    }

    fn save_journal(&self, entries: &[JournalEntry]) -> Result<(), AppError> {
        *self.journal.lock().unwrap() = entries.to_vec();
        Ok(())
    }

    fn load_current(&self) -> Result<Option<CurrentAnalysis>, AppError> {
        Ok(self.current.lock().unwrap().clone())
    }

    fn save_current(&self, current: &CurrentAnalysis) -> Result<(), AppError> {
        *self.current.lock().unwrap() = Some(current.clone());
        Ok(())
    }

    fn load_transcript(&self) -> Result<Transcript, AppError> {
        Ok(self.transcript.lock().unwrap().clone())
    }

    fn save_transcript(&self, transcript: &Transcript) -> Result<(), AppError> {
        *self.transcript.lock().unwrap() = transcript.clone();
        Ok(())
    }

    fn clear_transcript(&self) -> Result<(), AppError> {
        *self.transcript.lock().unwrap() = Transcript::new();
        Ok(())
    }
}
