//! Yoga recommendation flow, optionally illustrated.

use crate::app::AppContext;
use crate::app::commands::illustrate;
use crate::domain::prompt::PromptContext;
use crate::domain::validation::parse_reply;
use crate::domain::{AppError, ImageOutcome, YogaPose, YogaRecommendations, YogaRequest};
use crate::ports::{JournalStore, ModelClient, ModelRequest, PromptKind};

/// A recommended pose paired with its generated illustration outcome.
#[derive(Debug, Clone)]
pub struct IllustratedPose {
    pub pose: YogaPose,
    pub illustration: ImageOutcome,
}

pub fn execute<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: YogaRequest,
) -> Result<YogaRecommendations, AppError> {
    request.validate()?;

    let context = PromptContext::new().with_var("condition", request.condition.trim());
    let prompt = ctx.render_prompt(PromptKind::YogaRecommendation, &context)?;
    let reply = ctx
        .model()
        .generate(ModelRequest::structured(prompt, YogaRecommendations::response_schema()))?;

    let recommendations: YogaRecommendations = parse_reply("yoga", reply)?;
    recommendations.validate()?;
    Ok(recommendations)
}

/// Recommend poses and generate one illustration per pose concurrently.
///
/// A failed illustration degrades its own slot; the pose list itself is
/// unaffected.
pub fn execute_illustrated<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: YogaRequest,
) -> Result<Vec<IllustratedPose>, AppError> {
    let recommendations = execute(ctx, request)?;

    let prompts: Vec<String> = recommendations
        .recommendations
        .iter()
        .map(|pose| {
            format!(
                "A clear, well-lit illustration of a person performing the yoga pose: {}",
                pose.image_hint
            )
        })
        .collect();
    let outcomes = illustrate::execute_batch(ctx.model(), &prompts);

    Ok(recommendations
        .recommendations
        .into_iter()
        .zip(outcomes)
        .map(|(pose, illustration)| IllustratedPose { pose, illustration })
        .collect())
}
