//! Fixtures shared by unit tests.

use crate::domain::{ImagePayload, Severity, SkinAnalysis};

pub(crate) fn sample_analysis() -> SkinAnalysis {
    SkinAnalysis {
        condition: "Eczema".into(),
        explanation: "A chronic inflammatory condition causing dry, itchy patches.".into(),
        severity: Severity::Moderate,
        stage: "Acute".into(),
        possible_causes: vec!["Genetics".into(), "Allergens".into()],
        vitamin_deficiencies: vec!["Vitamin D".into()],
        natural_remedies: vec!["Oatmeal baths".into(), "Coconut oil".into()],
    }
}

pub(crate) fn sample_image() -> ImagePayload {
    ImagePayload::from_data_uri("data:image/png;base64,aGVsbG8=").expect("fixture image is valid")
}
