//! Natural remedies and dietary suggestions for a named condition.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::AppError;
use crate::domain::validation::{require_non_empty, require_request_field};

/// Input to the natural cures flow.
#[derive(Debug, Clone)]
pub struct NaturalCuresRequest {
    pub condition: String,
}

impl NaturalCuresRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_request_field("condition", &self.condition)
    }
}

/// Remedies and foods recommended for managing a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalCures {
    pub natural_remedies: Vec<String>,
    pub recommended_foods: Vec<String>,
}

impl NaturalCures {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty("naturalRemedies", &self.natural_remedies)?;
        require_non_empty("recommendedFoods", &self.recommended_foods)?;
        Ok(())
    }

    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "naturalRemedies": { "type": "ARRAY", "items": { "type": "STRING" } },
                "recommendedFoods": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["naturalRemedies", "recommendedFoods"]
        })
    }
}
