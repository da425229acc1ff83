//! Photo diagnosis flow.

use chrono::Utc;

use crate::app::AppContext;
use crate::domain::prompt::PromptContext;
use crate::domain::validation::parse_reply;
use crate::domain::{AppError, CurrentAnalysis, SkinAnalysis, SkinAnalysisRequest};
use crate::ports::{JournalStore, ModelClient, ModelRequest, PromptKind};

/// Execute the photo diagnosis flow and persist the result as the current
/// analysis for downstream flows.
pub fn execute<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: SkinAnalysisRequest,
) -> Result<SkinAnalysis, AppError> {
    let prompt = ctx.render_prompt(PromptKind::SkinAnalysis, &PromptContext::new())?;
    let reply = ctx.model().generate(
        ModelRequest::structured(prompt, SkinAnalysis::response_schema())
            .with_image(request.photo.clone()),
    )?;

    let analysis: SkinAnalysis = parse_reply("analyze", reply)?;
    analysis.validate()?;

    ctx.store().save_current(&CurrentAnalysis {
        analysis: analysis.clone(),
        image: request.photo,
        date: Utc::now(),
    })?;

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use crate::domain::testing::sample_image;
    use crate::ports::{MemoryJournalStore, MockModelClient};
    use serde_json::json;

    fn ctx() -> AppContext<MockModelClient, MemoryJournalStore> {
        AppContext::new(MockModelClient::new(), MemoryJournalStore::new())
    }

    #[test]
    fn valid_reply_is_parsed_validated_and_saved() {
        let ctx = ctx();
        ctx.model().push_reply(json!({
            "condition": "Psoriasis",
            "explanation": "An autoimmune condition producing scaly plaques.",
            "severity": "Mild",
            "stage": "Early",
            "possibleCauses": ["Genetics", "Stress"],
            "vitaminDeficiencies": ["Vitamin D"],
            "naturalRemedies": ["Aloe vera"]
        }));

        let analysis =
            execute(&ctx, SkinAnalysisRequest { photo: sample_image() }).unwrap();
        assert_eq!(analysis.condition, "Psoriasis");
        assert_eq!(analysis.severity, Severity::Mild);

        let current = ctx.store().load_current().unwrap().unwrap();
        assert_eq!(current.analysis, analysis);
        assert_eq!(current.image, sample_image());
    }

    #[test]
    fn reply_with_empty_remedies_is_rejected_and_not_saved() {
        let ctx = ctx();
        ctx.model().push_reply(json!({
            "condition": "Psoriasis",
            "explanation": "An autoimmune condition.",
            "severity": "Mild",
            "stage": "Early",
            "possibleCauses": ["Genetics"],
            "vitaminDeficiencies": ["Vitamin D"],
            "naturalRemedies": []
        }));

        let err = execute(&ctx, SkinAnalysisRequest { photo: sample_image() }).unwrap_err();
        assert!(matches!(err, AppError::InvalidReply { .. }));
        assert!(ctx.store().load_current().unwrap().is_none());
    }

    #[test]
    fn provider_failure_propagates_without_saving() {
        let ctx = ctx();
        ctx.model().push_failure("endpoint unreachable");

        let err = execute(&ctx, SkinAnalysisRequest { photo: sample_image() }).unwrap_err();
        assert!(matches!(err, AppError::ApiError { .. }));
        assert!(ctx.store().load_current().unwrap().is_none());
    }
}
