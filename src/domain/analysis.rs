//! Photo diagnosis and condition explanation records.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::validation::{require_non_blank, require_non_empty, require_request_field};
use crate::domain::{AppError, ImagePayload, Severity};

/// Input to the photo diagnosis flow.
#[derive(Debug, Clone)]
pub struct SkinAnalysisRequest {
    /// Photo of the skin condition to analyze.
    pub photo: ImagePayload,
}

/// Structured diagnosis produced by the photo analysis flow.
///
/// Every field is required; a reply missing any of them is rejected whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnalysis {
    /// Name of the identified skin condition.
    pub condition: String,
    /// Brief explanation of what the condition is.
    pub explanation: String,
    /// Estimated severity.
    pub severity: Severity,
    /// Estimated stage (e.g. Early, Acute, Chronic).
    pub stage: String,
    pub possible_causes: Vec<String>,
    pub vitamin_deficiencies: Vec<String>,
    pub natural_remedies: Vec<String>,
}

impl SkinAnalysis {
    /// Semantic constraints beyond the serde shape check.
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_blank("condition", &self.condition)?;
        require_non_blank("explanation", &self.explanation)?;
        require_non_blank("stage", &self.stage)?;
        require_non_empty("possibleCauses", &self.possible_causes)?;
        require_non_empty("vitaminDeficiencies", &self.vitamin_deficiencies)?;
        require_non_empty("naturalRemedies", &self.natural_remedies)?;
        Ok(())
    }

    /// Schema constraint sent with the model request.
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "condition": { "type": "STRING" },
                "explanation": { "type": "STRING" },
                "severity": { "type": "STRING", "enum": ["Mild", "Moderate", "Severe"] },
                "stage": { "type": "STRING" },
                "possibleCauses": { "type": "ARRAY", "items": { "type": "STRING" } },
                "vitaminDeficiencies": { "type": "ARRAY", "items": { "type": "STRING" } },
                "naturalRemedies": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": [
                "condition", "explanation", "severity", "stage",
                "possibleCauses", "vitaminDeficiencies", "naturalRemedies"
            ]
        })
    }
}

/// Input to the condition explanation flow.
#[derive(Debug, Clone)]
pub struct ExplainRequest {
    /// Name of the condition to explain.
    pub condition: String,
}

impl ExplainRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_request_field("condition", &self.condition)
    }
}

/// Detailed profile of a named condition, produced by the explanation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionProfile {
    #[serde(rename = "diseaseName")]
    pub condition: String,
    pub severity: Severity,
    pub stage: String,
    pub explanation: String,
    pub possible_causes: Vec<String>,
    /// Explanation of potential vitamin deficiencies related to the condition.
    pub vitamin_deficiency: String,
}

impl ConditionProfile {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_blank("diseaseName", &self.condition)?;
        require_non_blank("stage", &self.stage)?;
        require_non_blank("explanation", &self.explanation)?;
        require_non_empty("possibleCauses", &self.possible_causes)?;
        require_non_blank("vitaminDeficiency", &self.vitamin_deficiency)?;
        Ok(())
    }

    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "diseaseName": { "type": "STRING" },
                "severity": { "type": "STRING", "enum": ["Mild", "Moderate", "Severe"] },
                "stage": { "type": "STRING" },
                "explanation": { "type": "STRING" },
                "possibleCauses": { "type": "ARRAY", "items": { "type": "STRING" } },
                "vitaminDeficiency": { "type": "STRING" }
            },
            "required": [
                "diseaseName", "severity", "stage", "explanation",
                "possibleCauses", "vitaminDeficiency"
            ]
        })
    }
}
