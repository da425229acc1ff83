//! Contract tests for the advisory flows, exercised through the app layer
//! with a scriptable model client.

mod common;

use common::{analysis_reply, mock_context, mock_context_with_current, sample_image};
use serde_json::json;

use dermalens::AppError;
use dermalens::app::commands::{analyze, chat, cures, illustrate, products, scan, yoga};
use dermalens::domain::{
    ImageOutcome, ImagePayload, IngredientScanRequest, NaturalCuresRequest, ProductRequest,
    Severity, SkinAnalysisRequest, YogaRequest,
};
use dermalens::ports::{ModelClient, ModelRequest};

#[test]
fn analyze_returns_constrained_severity_and_non_empty_arrays() {
    let ctx = mock_context();
    ctx.model().push_reply(analysis_reply());

    let analysis = analyze::execute(&ctx, SkinAnalysisRequest { photo: sample_image() }).unwrap();

    assert!(Severity::ALL.contains(&analysis.severity));
    assert!(!analysis.possible_causes.is_empty());
    assert!(!analysis.vitamin_deficiencies.is_empty());
    assert!(!analysis.natural_remedies.is_empty());
    assert!(analysis.possible_causes.iter().all(|c| !c.trim().is_empty()));
}

#[test]
fn invalid_requests_never_reach_the_model() {
    let ctx = mock_context_with_current();

    assert!(matches!(
        cures::execute(&ctx, NaturalCuresRequest { condition: " ".into() }),
        Err(AppError::InvalidRequest { .. })
    ));
    assert!(matches!(
        products::execute(&ctx, ProductRequest { condition: "".into(), description: None }),
        Err(AppError::InvalidRequest { .. })
    ));
    assert!(matches!(
        yoga::execute(&ctx, YogaRequest { condition: "\t".into() }),
        Err(AppError::InvalidRequest { .. })
    ));
    assert!(matches!(
        scan::execute(
            &ctx,
            IngredientScanRequest { photo: sample_image(), condition: "".into() }
        ),
        Err(AppError::InvalidRequest { .. })
    ));
    assert!(matches!(
        chat::execute(&ctx, "   ", false),
        Err(AppError::InvalidRequest { .. })
    ));

    assert_eq!(ctx.model().generate_calls(), 0);
    assert_eq!(ctx.model().image_calls(), 0);
}

#[test]
fn recommendations_stay_within_three_to_five_items() {
    let product = json!({
        "productName": "Brand Gentle Cleanser",
        "reason": "Fragrance-free and non-comedogenic.",
        "purchaseLink": "https://www.example.com/cleanser"
    });

    for (count, expect_ok) in [(1, false), (3, true), (5, true), (7, false)] {
        let ctx = mock_context();
        let items: Vec<serde_json::Value> = (0..count).map(|_| product.clone()).collect();
        ctx.model().push_reply(json!({ "recommendations": items }));

        let result = products::execute(
            &ctx,
            ProductRequest { condition: "Acne".into(), description: None },
        );
        assert_eq!(result.is_ok(), expect_ok, "count {}", count);
        if let Ok(out) = result {
            assert!(out.recommendations.iter().all(|r| !r.product_name.trim().is_empty()));
        }
    }
}

/// Deterministic per-prompt failures for batch isolation checks.
struct SecondSlotFails;

impl ModelClient for SecondSlotFails {
    fn generate(&self, _request: ModelRequest<'_>) -> Result<serde_json::Value, AppError> {
        unreachable!("batch generation never issues text completions")
    }

    fn generate_image(&self, prompt: &str) -> Result<ImagePayload, AppError> {
        if prompt.contains("two") {
            Err(AppError::ServerError { status: 500 })
        } else {
            Ok(common::sample_image())
        }
    }
}

#[test]
fn image_batch_keeps_cardinality_and_isolates_the_failed_slot() {
    let prompts = vec!["slot one".to_string(), "slot two".to_string(), "slot three".to_string()];
    let outcomes = illustrate::execute_batch(&SecondSlotFails, &prompts);

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], ImageOutcome::Generated(_)));
    assert!(matches!(outcomes[1], ImageOutcome::Failed(_)));
    assert!(matches!(outcomes[2], ImageOutcome::Generated(_)));
}

#[test]
fn follow_up_answers_carry_the_disclaimer_for_any_question() {
    let questions = [
        "Can I still go swimming?",
        "How long until it clears up?",
        "Should I change my detergent?",
    ];
    for question in questions {
        let ctx = mock_context_with_current();
        ctx.model().push_reply(json!({ "answer": "Here is some practical advice." }));

        let answer = chat::execute(&ctx, question, false).unwrap();
        assert!(
            answer.answer.to_lowercase().contains("medical professional"),
            "no disclaimer for: {}",
            question
        );
    }
}

#[test]
fn eczema_natural_cures_scenario() {
    let ctx = mock_context();
    ctx.model().push_reply(json!({
        "naturalRemedies": ["Colloidal oatmeal baths", "Aloe vera gel"],
        "recommendedFoods": ["Fatty fish", "Leafy greens", "Probiotic yogurt"]
    }));

    let cures =
        cures::execute(&ctx, NaturalCuresRequest { condition: "Eczema".into() }).unwrap();
    assert!(!cures.natural_remedies.is_empty());
    assert!(!cures.recommended_foods.is_empty());
    assert!(cures.natural_remedies.iter().all(|r| !r.is_empty()));
    assert!(cures.recommended_foods.iter().all(|f| !f.is_empty()));
}

#[test]
fn ingredient_reply_without_summary_fails_instead_of_defaulting() {
    let ctx = mock_context();
    ctx.model().push_reply(json!({
        "beneficialIngredients": ["Niacinamide"],
        "harmfulIngredients": ["Fragrance"]
    }));

    let err = scan::execute(
        &ctx,
        IngredientScanRequest { photo: sample_image(), condition: "Eczema".into() },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::MalformedReply { .. }));
}

#[test]
fn provider_failure_is_fatal_and_not_retried_by_the_flow() {
    let ctx = mock_context();
    ctx.model().push_failure("endpoint is down");

    let err =
        cures::execute(&ctx, NaturalCuresRequest { condition: "Eczema".into() }).unwrap_err();
    assert!(matches!(err, AppError::ApiError { .. }));
    assert_eq!(ctx.model().generate_calls(), 1);
}
