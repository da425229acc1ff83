//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::Utc;
use serde_json::{Value, json};

use dermalens::app::AppContext;
use dermalens::domain::{CurrentAnalysis, ImagePayload, Severity, SkinAnalysis};
use dermalens::ports::{JournalStore, MemoryJournalStore, MockModelClient};
use dermalens::services::FilesystemJournalStore;

pub const PNG_URI: &str = "data:image/png;base64,aGVsbG8=";

pub fn sample_image() -> ImagePayload {
    ImagePayload::from_data_uri(PNG_URI).expect("fixture image is valid")
}

pub fn sample_analysis() -> SkinAnalysis {
    SkinAnalysis {
        condition: "Eczema".into(),
        explanation: "A chronic inflammatory condition causing dry, itchy patches.".into(),
        severity: Severity::Moderate,
        stage: "Acute".into(),
        possible_causes: vec!["Genetics".into(), "Allergens".into()],
        vitamin_deficiencies: vec!["Vitamin D".into()],
        natural_remedies: vec!["Oatmeal baths".into()],
    }
}

/// A well-formed photo diagnosis reply.
pub fn analysis_reply() -> Value {
    json!({
        "condition": "Eczema",
        "explanation": "A chronic inflammatory condition causing dry, itchy patches.",
        "severity": "Moderate",
        "stage": "Acute",
        "possibleCauses": ["Genetics", "Allergens"],
        "vitaminDeficiencies": ["Vitamin D"],
        "naturalRemedies": ["Oatmeal baths", "Coconut oil"]
    })
}

/// Context with a scriptable model and an in-memory store.
pub fn mock_context() -> AppContext<MockModelClient, MemoryJournalStore> {
    AppContext::new(MockModelClient::new(), MemoryJournalStore::new())
}

/// Context whose store already holds a saved analysis.
pub fn mock_context_with_current() -> AppContext<MockModelClient, MemoryJournalStore> {
    let ctx = mock_context();
    ctx.store()
        .save_current(&CurrentAnalysis {
            analysis: sample_analysis(),
            image: sample_image(),
            date: Utc::now(),
        })
        .expect("memory store never fails");
    ctx
}

/// Filesystem store rooted in a fresh temp directory.
pub fn temp_store() -> (tempfile::TempDir, FilesystemJournalStore) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = FilesystemJournalStore::new(dir.path().join("dermalens"));
    (dir, store)
}

/// Write a tiny valid image file for CLI exercises.
pub fn write_sample_image(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("photo.png");
    std::fs::write(&path, b"not a real png but bytes suffice").expect("write sample image");
    path
}
