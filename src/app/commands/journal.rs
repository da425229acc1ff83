//! Journal operations: save, list, show, delete, clear.
//!
//! These never call the model; they operate on the store alone with
//! read-all, modify, write-all semantics.

use chrono::Utc;

use crate::domain::journal::{find_entry, remove_entry};
use crate::domain::{AppError, JournalEntry, SelfSeverity};
use crate::ports::JournalStore;

/// Save the current analysis as a journal entry with user notes and a
/// self-reported severity.
pub fn add<J: JournalStore>(
    store: &J,
    notes: &str,
    self_severity: SelfSeverity,
) -> Result<JournalEntry, AppError> {
    let current = store.load_current()?.ok_or(AppError::NoCurrentAnalysis)?;

    let entry = JournalEntry::new(
        current.analysis,
        current.image,
        notes.trim().to_string(),
        self_severity,
        Utc::now(),
    );

    let mut entries = store.load_journal()?;
    entries.push(entry.clone());
    store.save_journal(&entries)?;

    Ok(entry)
}

/// All journal entries, newest first.
pub fn list<J: JournalStore>(store: &J) -> Result<Vec<JournalEntry>, AppError> {
    let mut entries = store.load_journal()?;
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entries)
}

/// Look up one entry by id or unambiguous id prefix.
pub fn show<J: JournalStore>(store: &J, id: &str) -> Result<JournalEntry, AppError> {
    let entries = store.load_journal()?;
    find_entry(&entries, id).cloned()
}

/// Delete one entry by id or unambiguous id prefix.
pub fn delete<J: JournalStore>(store: &J, id: &str) -> Result<JournalEntry, AppError> {
    let mut entries = store.load_journal()?;
    let removed = remove_entry(&mut entries, id)?;
    store.save_journal(&entries)?;
    Ok(removed)
}

/// Delete every entry, returning how many were removed.
pub fn clear<J: JournalStore>(store: &J) -> Result<usize, AppError> {
    let entries = store.load_journal()?;
    let count = entries.len();
    store.save_journal(&[])?;
    Ok(count)
}
