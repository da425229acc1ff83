//! Condition explanation flow.

use crate::app::AppContext;
use crate::domain::prompt::PromptContext;
use crate::domain::validation::parse_reply;
use crate::domain::{AppError, ConditionProfile, ExplainRequest};
use crate::ports::{JournalStore, ModelClient, ModelRequest, PromptKind};

pub fn execute<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: ExplainRequest,
) -> Result<ConditionProfile, AppError> {
    request.validate()?;

    let context = PromptContext::new().with_var("condition", request.condition.trim());
    let prompt = ctx.render_prompt(PromptKind::ExplainCondition, &context)?;
    let reply = ctx
        .model()
        .generate(ModelRequest::structured(prompt, ConditionProfile::response_schema()))?;

    let profile: ConditionProfile = parse_reply("explain", reply)?;
    profile.validate()?;
    Ok(profile)
}
