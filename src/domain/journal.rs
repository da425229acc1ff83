//! Durable journal of saved analyses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{AppError, ImagePayload, SelfSeverity, SkinAnalysis};

/// Length of the hex id kept from the entry digest.
const ID_LEN: usize = 12;

/// The most recent analysis, kept so follow-up flows can reference it
/// without re-running the diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentAnalysis {
    pub analysis: SkinAnalysis,
    pub image: ImagePayload,
    pub date: DateTime<Utc>,
}

/// One saved journal record: the analysis, the photo it was made from,
/// user notes, and a self-reported severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub analysis: SkinAnalysis,
    pub image: ImagePayload,
    pub notes: String,
    pub self_severity: SelfSeverity,
}

impl JournalEntry {
    /// Build an entry, deriving its id from the image bytes and timestamp.
    pub fn new(
        analysis: SkinAnalysis,
        image: ImagePayload,
        notes: String,
        self_severity: SelfSeverity,
        date: DateTime<Utc>,
    ) -> Self {
        let id = derive_id(&image, &date);
        Self { id, date, analysis, image, notes, self_severity }
    }
}

fn derive_id(image: &ImagePayload, date: &DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.bytes());
    hasher.update(date.to_rfc3339().as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex[..ID_LEN].to_string()
}

/// Find an entry by id, accepting an unambiguous prefix.
pub fn find_entry<'a>(
    entries: &'a [JournalEntry],
    id: &str,
) -> Result<&'a JournalEntry, AppError> {
    if id.is_empty() {
        return Err(AppError::EntryNotFound(id.to_string()));
    }
    let mut matches = entries.iter().filter(|entry| entry.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Ok(entry),
        (Some(_), Some(_)) => Err(AppError::AmbiguousEntryId(id.to_string())),
        (None, _) => Err(AppError::EntryNotFound(id.to_string())),
    }
}

/// Remove an entry by id (prefix accepted), returning the removed record.
pub fn remove_entry(entries: &mut Vec<JournalEntry>, id: &str) -> Result<JournalEntry, AppError> {
    let found_id = find_entry(entries, id)?.id.clone();
    let idx = entries.iter().position(|entry| entry.id == found_id).expect("entry just found");
    Ok(entries.remove(idx))
}
