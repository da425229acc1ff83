//! Product and yoga recommendations for a diagnosed condition.
//!
//! Both flows promise between [`MIN_ITEMS`] and [`MAX_ITEMS`] items; a reply
//! outside those bounds is rejected whole.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::Url;

use crate::domain::validation::{require_non_blank, require_request_field};
use crate::domain::AppError;

pub const MIN_ITEMS: usize = 3;
pub const MAX_ITEMS: usize = 5;

fn require_item_count(field: &str, count: usize) -> Result<(), AppError> {
    if !(MIN_ITEMS..=MAX_ITEMS).contains(&count) {
        return Err(AppError::invalid_reply(
            field,
            format!("expected {}-{} items, got {}", MIN_ITEMS, MAX_ITEMS, count),
        ));
    }
    Ok(())
}

/// Input to the product recommendation flow.
#[derive(Debug, Clone)]
pub struct ProductRequest {
    pub condition: String,
    /// What the user is looking for, e.g. "a gentle daily moisturizer".
    pub description: Option<String>,
}

impl ProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_request_field("condition", &self.condition)?;
        if let Some(description) = &self.description {
            require_request_field("description", description)?;
        }
        Ok(())
    }
}

/// One recommended product with a purchase link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendation {
    /// Full brand and product name.
    pub product_name: String,
    /// One-sentence rationale for the recommendation.
    pub reason: String,
    /// Direct purchase link on a major retailer. Parsed as a URL, so a
    /// malformed link fails the whole reply.
    pub purchase_link: Url,
}

/// Output of the product recommendation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecommendations {
    pub recommendations: Vec<ProductRecommendation>,
}

impl ProductRecommendations {
    pub fn validate(&self) -> Result<(), AppError> {
        require_item_count("recommendations", self.recommendations.len())?;
        for item in &self.recommendations {
            require_non_blank("productName", &item.product_name)?;
            require_non_blank("reason", &item.reason)?;
        }
        Ok(())
    }

    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "recommendations": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "productName": { "type": "STRING" },
                            "reason": { "type": "STRING" },
                            "purchaseLink": { "type": "STRING" }
                        },
                        "required": ["productName", "reason", "purchaseLink"]
                    }
                }
            },
            "required": ["recommendations"]
        })
    }
}

/// Input to the yoga recommendation flow.
#[derive(Debug, Clone)]
pub struct YogaRequest {
    pub condition: String,
}

impl YogaRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_request_field("condition", &self.condition)
    }
}

/// One recommended yoga pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YogaPose {
    /// Name of the asana.
    pub pose_name: String,
    /// Step-by-step instructions for the pose.
    pub description: String,
    /// How the pose benefits skin health and the user's condition.
    pub benefits: String,
    /// One or two keywords for generating an illustration of the pose.
    pub image_hint: String,
}

/// Output of the yoga recommendation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaRecommendations {
    pub recommendations: Vec<YogaPose>,
}

impl YogaRecommendations {
    pub fn validate(&self) -> Result<(), AppError> {
        require_item_count("recommendations", self.recommendations.len())?;
        for pose in &self.recommendations {
            require_non_blank("poseName", &pose.pose_name)?;
            require_non_blank("description", &pose.description)?;
            require_non_blank("benefits", &pose.benefits)?;
            require_non_blank("imageHint", &pose.image_hint)?;
        }
        Ok(())
    }

    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "recommendations": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "poseName": { "type": "STRING" },
                            "description": { "type": "STRING" },
                            "benefits": { "type": "STRING" },
                            "imageHint": { "type": "STRING" }
                        },
                        "required": ["poseName", "description", "benefits", "imageHint"]
                    }
                }
            },
            "required": ["recommendations"]
        })
    }
}
