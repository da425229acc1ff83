//! Ingredient scan flow.

use crate::app::AppContext;
use crate::domain::prompt::PromptContext;
use crate::domain::validation::parse_reply;
use crate::domain::{AppError, ImagePayload, IngredientReport, IngredientScanRequest};
use crate::ports::{JournalStore, ModelClient, ModelRequest, PromptKind};

pub fn execute<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: IngredientScanRequest,
) -> Result<IngredientReport, AppError> {
    request.validate()?;

    let context = PromptContext::new().with_var("condition", request.condition.trim());
    let prompt = ctx.render_prompt(PromptKind::IngredientScan, &context)?;
    let reply = ctx.model().generate(
        ModelRequest::structured(prompt, IngredientReport::response_schema())
            .with_image(request.photo),
    )?;

    let report: IngredientReport = parse_reply("scan", reply)?;
    report.validate()?;
    Ok(report)
}

/// CLI-facing wrapper: the condition defaults to the saved analysis.
pub fn execute_for_current<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    photo: ImagePayload,
    condition: Option<String>,
) -> Result<IngredientReport, AppError> {
    let condition = match condition {
        Some(condition) => condition,
        None => {
            ctx.store().load_current()?.ok_or(AppError::NoCurrentAnalysis)?.analysis.condition
        }
    };
    execute(ctx, IngredientScanRequest { photo, condition })
}
