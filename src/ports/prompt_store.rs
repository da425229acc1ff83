//! Prompt template store port.

use crate::domain::prompt::PromptError;

/// The templated flows, one fixed instructional template each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SkinAnalysis,
    ExplainCondition,
    NaturalCures,
    FollowUp,
    IngredientScan,
    ProductRecommendation,
    YogaRecommendation,
}

impl PromptKind {
    pub const ALL: [PromptKind; 7] = [
        PromptKind::SkinAnalysis,
        PromptKind::ExplainCondition,
        PromptKind::NaturalCures,
        PromptKind::FollowUp,
        PromptKind::IngredientScan,
        PromptKind::ProductRecommendation,
        PromptKind::YogaRecommendation,
    ];

    /// Asset file name under `assets/prompts/`.
    pub fn asset_name(&self) -> &'static str {
        match self {
            PromptKind::SkinAnalysis => "skin_analysis.j2",
            PromptKind::ExplainCondition => "explain_condition.j2",
            PromptKind::NaturalCures => "natural_cures.j2",
            PromptKind::FollowUp => "follow_up.j2",
            PromptKind::IngredientScan => "ingredient_scan.j2",
            PromptKind::ProductRecommendation => "product_recommendation.j2",
            PromptKind::YogaRecommendation => "yoga_recommendation.j2",
        }
    }
}

/// Port for accessing the per-flow prompt templates.
pub trait PromptStore {
    /// Get the template for a flow.
    fn template(&self, kind: PromptKind) -> Result<&str, PromptError>;
}
