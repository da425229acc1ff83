//! Ingredient-list scanning for a diagnosed condition.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::validation::{require_no_blank_items, require_non_blank, require_request_field};
use crate::domain::{AppError, ImagePayload};

/// Input to the ingredient scan flow: a photo of a product's ingredient
/// list plus the condition to check it against.
#[derive(Debug, Clone)]
pub struct IngredientScanRequest {
    pub photo: ImagePayload,
    pub condition: String,
}

impl IngredientScanRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_request_field("condition", &self.condition)
    }
}

/// Categorized ingredient report.
///
/// Either ingredient list may be empty (a product can have no notable
/// entries of one kind) but the summary is always required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientReport {
    pub beneficial_ingredients: Vec<String>,
    pub harmful_ingredients: Vec<String>,
    pub summary: String,
}

impl IngredientReport {
    pub fn validate(&self) -> Result<(), AppError> {
        require_no_blank_items("beneficialIngredients", &self.beneficial_ingredients)?;
        require_no_blank_items("harmfulIngredients", &self.harmful_ingredients)?;
        require_non_blank("summary", &self.summary)?;
        Ok(())
    }

    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "beneficialIngredients": { "type": "ARRAY", "items": { "type": "STRING" } },
                "harmfulIngredients": { "type": "ARRAY", "items": { "type": "STRING" } },
                "summary": { "type": "STRING" }
            },
            "required": ["beneficialIngredients", "harmfulIngredients", "summary"]
        })
    }
}
