//! dermalens: AI-assisted skincare advisory flows.
//!
//! Each public function is one complete flow: validate the request, render
//! the flow's prompt, make one model call, and validate the structured
//! reply. State beyond a single call lives in the journal store under the
//! data directory.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;

use app::{AppContext, commands};
use ports::JournalStore;
use domain::{
    AppConfig, ConditionProfile, FollowUpAnswer, ImageOutcome, ImagePayload, IngredientReport,
    JournalEntry, NaturalCures, ProductRecommendations, SelfSeverity, SkinAnalysis,
    SkinAnalysisRequest, YogaRecommendations, YogaRequest,
};
use services::{FilesystemJournalStore, HttpModelClient, RetryPolicy, RetryingModelClient};

pub use app::commands::yoga::IllustratedPose;
pub use domain::AppError;

type DefaultContext = AppContext<RetryingModelClient, FilesystemJournalStore>;

fn build_context(data_dir: Option<&Path>) -> Result<DefaultContext, AppError> {
    let root = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(FilesystemJournalStore::default_dir);
    let config = AppConfig::load_or_default(&root)?;
    let http = HttpModelClient::from_env(&config.model)?;
    let model = RetryingModelClient::new(Box::new(http), RetryPolicy::from_config(&config.model));
    Ok(AppContext::new(model, FilesystemJournalStore::new(root)))
}

fn resolve_condition(ctx: &DefaultContext, condition: Option<String>) -> Result<String, AppError> {
    match condition {
        Some(condition) => Ok(condition),
        None => {
            Ok(ctx.store().load_current()?.ok_or(AppError::NoCurrentAnalysis)?.analysis.condition)
        }
    }
}

/// Diagnose a skin condition from a photo and save it as the current
/// analysis.
pub fn analyze(image: &Path, data_dir: Option<&Path>) -> Result<SkinAnalysis, AppError> {
    let ctx = build_context(data_dir)?;
    let photo = ImagePayload::from_file(image)?;
    commands::analyze::execute(&ctx, SkinAnalysisRequest { photo })
}

/// Explain a named condition.
pub fn explain(condition: &str, data_dir: Option<&Path>) -> Result<ConditionProfile, AppError> {
    let ctx = build_context(data_dir)?;
    commands::explain::execute(&ctx, domain::ExplainRequest { condition: condition.to_string() })
}

/// Suggest natural remedies and foods for a named condition.
pub fn natural_cures(condition: &str, data_dir: Option<&Path>) -> Result<NaturalCures, AppError> {
    let ctx = build_context(data_dir)?;
    commands::cures::execute(
        &ctx,
        domain::NaturalCuresRequest { condition: condition.to_string() },
    )
}

/// Fetch the explanation and natural cures for a condition concurrently.
pub fn overview(
    condition: &str,
    data_dir: Option<&Path>,
) -> Result<(ConditionProfile, NaturalCures), AppError> {
    let ctx = build_context(data_dir)?;
    commands::overview::execute(&ctx, condition)
}

/// Ask a follow-up question about the saved analysis, maintaining the
/// consultation transcript.
pub fn follow_up(
    question: &str,
    reset: bool,
    data_dir: Option<&Path>,
) -> Result<FollowUpAnswer, AppError> {
    let ctx = build_context(data_dir)?;
    commands::chat::execute(&ctx, question, reset)
}

/// Scan a product's ingredient-list photo against a condition (defaults to
/// the saved analysis).
pub fn scan_ingredients(
    image: &Path,
    condition: Option<String>,
    data_dir: Option<&Path>,
) -> Result<IngredientReport, AppError> {
    let ctx = build_context(data_dir)?;
    let photo = ImagePayload::from_file(image)?;
    commands::scan::execute_for_current(&ctx, photo, condition)
}

/// Recommend 3-5 products for a condition (defaults to the saved analysis).
pub fn recommend_products(
    condition: Option<String>,
    description: Option<String>,
    data_dir: Option<&Path>,
) -> Result<ProductRecommendations, AppError> {
    let ctx = build_context(data_dir)?;
    let condition = resolve_condition(&ctx, condition)?;
    commands::products::execute(&ctx, domain::ProductRequest { condition, description })
}

/// Recommend 3-5 yoga poses for a condition (defaults to the saved
/// analysis).
pub fn recommend_yoga(
    condition: Option<String>,
    data_dir: Option<&Path>,
) -> Result<YogaRecommendations, AppError> {
    let ctx = build_context(data_dir)?;
    let condition = resolve_condition(&ctx, condition)?;
    commands::yoga::execute(&ctx, YogaRequest { condition })
}

/// Recommend yoga poses and generate an illustration per pose, with
/// per-pose failure isolation.
pub fn recommend_yoga_illustrated(
    condition: Option<String>,
    data_dir: Option<&Path>,
) -> Result<Vec<IllustratedPose>, AppError> {
    let ctx = build_context(data_dir)?;
    let condition = resolve_condition(&ctx, condition)?;
    commands::yoga::execute_illustrated(&ctx, YogaRequest { condition })
}

/// Generate a single image from a text prompt.
pub fn generate_image(prompt: &str, data_dir: Option<&Path>) -> Result<ImagePayload, AppError> {
    let ctx = build_context(data_dir)?;
    commands::illustrate::execute(ctx.model(), prompt)
}

/// Generate one image per prompt concurrently; failed prompts degrade
/// their own slot only.
pub fn generate_images(
    prompts: &[String],
    data_dir: Option<&Path>,
) -> Result<Vec<ImageOutcome>, AppError> {
    let ctx = build_context(data_dir)?;
    Ok(commands::illustrate::execute_batch(ctx.model(), prompts))
}

/// Save the current analysis to the journal.
pub fn journal_add(
    notes: &str,
    self_severity: u8,
    data_dir: Option<&Path>,
) -> Result<JournalEntry, AppError> {
    commands::journal::add(&journal_store(data_dir), notes, SelfSeverity::new(self_severity)?)
}

/// List journal entries, newest first.
pub fn journal_list(data_dir: Option<&Path>) -> Result<Vec<JournalEntry>, AppError> {
    commands::journal::list(&journal_store(data_dir))
}

/// Show one journal entry by id or unambiguous prefix.
pub fn journal_show(id: &str, data_dir: Option<&Path>) -> Result<JournalEntry, AppError> {
    commands::journal::show(&journal_store(data_dir), id)
}

/// Delete one journal entry by id or unambiguous prefix.
pub fn journal_delete(id: &str, data_dir: Option<&Path>) -> Result<JournalEntry, AppError> {
    commands::journal::delete(&journal_store(data_dir), id)
}

/// Delete every journal entry, returning how many were removed.
pub fn journal_clear(data_dir: Option<&Path>) -> Result<usize, AppError> {
    commands::journal::clear(&journal_store(data_dir))
}

/// Journal operations never call the model, so they need no API key and no
/// config; only the store.
fn journal_store(data_dir: Option<&Path>) -> FilesystemJournalStore {
    let root = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(FilesystemJournalStore::default_dir);
    FilesystemJournalStore::new(root)
}
