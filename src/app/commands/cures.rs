//! Natural cures flow.

use crate::app::AppContext;
use crate::domain::prompt::PromptContext;
use crate::domain::validation::parse_reply;
use crate::domain::{AppError, NaturalCures, NaturalCuresRequest};
use crate::ports::{JournalStore, ModelClient, ModelRequest, PromptKind};

pub fn execute<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: NaturalCuresRequest,
) -> Result<NaturalCures, AppError> {
    request.validate()?;

    let context = PromptContext::new().with_var("condition", request.condition.trim());
    let prompt = ctx.render_prompt(PromptKind::NaturalCures, &context)?;
    let reply =
        ctx.model().generate(ModelRequest::structured(prompt, NaturalCures::response_schema()))?;

    let cures: NaturalCures = parse_reply("cures", reply)?;
    cures.validate()?;
    Ok(cures)
}
