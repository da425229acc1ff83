//! Product recommendation flow.
//!
//! The flow binds the product-search tool so the model can ground its
//! suggestions in catalog data. The shipped handler is an explicit stub;
//! callers with a real shopping API pass their own handler via
//! [`execute_with`].

use crate::app::AppContext;
use crate::domain::prompt::PromptContext;
use crate::domain::validation::parse_reply;
use crate::domain::{AppError, ProductRecommendations, ProductRequest};
use crate::ports::{JournalStore, ModelClient, ModelRequest, PromptKind, StubProductSearch, ToolHandler};

const DEFAULT_DESCRIPTION: &str = "a product suitable for daily use";

pub fn execute<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: ProductRequest,
) -> Result<ProductRecommendations, AppError> {
    execute_with(ctx, request, &StubProductSearch::new())
}

/// Run the flow with a caller-supplied product search tool.
pub fn execute_with<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: ProductRequest,
    tool: &dyn ToolHandler,
) -> Result<ProductRecommendations, AppError> {
    request.validate()?;

    let description = request.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);
    let context = PromptContext::new()
        .with_var("condition", request.condition.trim())
        .with_var("description", description.trim());
    let prompt = ctx.render_prompt(PromptKind::ProductRecommendation, &context)?;

    let reply = ctx.model().generate(
        ModelRequest::structured(prompt, ProductRecommendations::response_schema())
            .with_tool(tool),
    )?;

    let recommendations: ProductRecommendations = parse_reply("products", reply)?;
    recommendations.validate()?;
    Ok(recommendations)
}
