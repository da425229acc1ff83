//! Follow-up consultation flow.

use crate::app::AppContext;
use crate::domain::prompt::PromptContext;
use crate::domain::validation::parse_reply;
use crate::domain::{AppError, ChatRole, FollowUpAnswer, FollowUpRequest};
use crate::ports::{JournalStore, ModelClient, ModelRequest, PromptKind};

/// Ask one follow-up question against a prior analysis.
///
/// Pure flow: validates, renders, invokes, and guarantees the answer
/// carries a medical disclaimer. Transcript persistence is [`execute`]'s
/// concern.
pub fn ask<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    request: FollowUpRequest,
) -> Result<FollowUpAnswer, AppError> {
    request.validate()?;

    let analysis = &request.analysis;
    let context = PromptContext::new()
        .with_var("condition", &analysis.condition)
        .with_var("explanation", &analysis.explanation)
        .with_var("severity", analysis.severity.as_str())
        .with_var("stage", &analysis.stage)
        .with_var("possible_causes", analysis.possible_causes.join(", "))
        .with_var("vitamin_deficiencies", analysis.vitamin_deficiencies.join(", "))
        .with_var("natural_remedies", analysis.natural_remedies.join(", "))
        .with_var("chat_history", request.history.render())
        .with_var("question", request.question.trim());
    let prompt = ctx.render_prompt(PromptKind::FollowUp, &context)?;

    let reply =
        ctx.model().generate(ModelRequest::structured(prompt, FollowUpAnswer::response_schema()))?;
    let answer: FollowUpAnswer = parse_reply("chat", reply)?;
    Ok(answer.ensure_disclaimer())
}

/// CLI-facing wrapper: resolves the saved analysis, maintains the
/// persisted transcript, and returns the answer.
pub fn execute<M: ModelClient, J: JournalStore>(
    ctx: &AppContext<M, J>,
    question: &str,
    reset: bool,
) -> Result<FollowUpAnswer, AppError> {
    if reset {
        ctx.store().clear_transcript()?;
    }

    let current = ctx.store().load_current()?.ok_or(AppError::NoCurrentAnalysis)?;
    let history = ctx.store().load_transcript()?;

    let answer = ask(
        ctx,
        FollowUpRequest {
            analysis: current.analysis,
            question: question.to_string(),
            history: history.clone(),
        },
    )?;

    let mut updated = history;
    updated.push(ChatRole::User, question.trim());
    updated.push(ChatRole::Assistant, answer.answer.clone());
    ctx.store().save_transcript(&updated)?;

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{sample_analysis, sample_image};
    use crate::domain::{CurrentAnalysis, Transcript};
    use crate::ports::{MemoryJournalStore, MockModelClient};
    use chrono::Utc;
    use serde_json::json;

    fn ctx_with_current() -> AppContext<MockModelClient, MemoryJournalStore> {
        let ctx = AppContext::new(MockModelClient::new(), MemoryJournalStore::new());
        ctx.store()
            .save_current(&CurrentAnalysis {
                analysis: sample_analysis(),
                image: sample_image(),
                date: Utc::now(),
            })
            .unwrap();
        ctx
    }

    #[test]
    fn answers_always_carry_a_disclaimer() {
        let questions = ["Is it contagious?", "Can I swim?", "What soap should I use?"];
        for question in questions {
            let ctx = ctx_with_current();
            ctx.model().push_reply(json!({ "answer": "Short practical advice." }));
            let answer = execute(&ctx, question, false).unwrap();
            assert!(
                answer.answer.to_lowercase().contains("medical professional"),
                "missing disclaimer for question: {}",
                question
            );
        }
    }

    #[test]
    fn transcript_grows_by_one_exchange_per_question() {
        let ctx = ctx_with_current();
        ctx.model().push_reply(json!({ "answer": "Yes. Consult a medical professional." }));
        execute(&ctx, "Can I use sunscreen?", false).unwrap();

        let transcript = ctx.store().load_transcript().unwrap();
        assert_eq!(transcript.turns().len(), 2);
        assert_eq!(transcript.turns()[0].role, ChatRole::User);
        assert_eq!(transcript.turns()[1].role, ChatRole::Assistant);
    }

    #[test]
    fn reset_clears_history_before_asking() {
        let ctx = ctx_with_current();
        let mut old = Transcript::new();
        old.push(ChatRole::User, "old question");
        ctx.store().save_transcript(&old).unwrap();

        ctx.model().push_reply(json!({ "answer": "Fresh start. See a medical professional." }));
        execute(&ctx, "New question?", true).unwrap();

        let transcript = ctx.store().load_transcript().unwrap();
        assert_eq!(transcript.turns().len(), 2);
        assert_eq!(transcript.turns()[0].text, "New question?");
    }

    #[test]
    fn missing_current_analysis_is_reported() {
        let ctx = AppContext::new(MockModelClient::new(), MemoryJournalStore::new());
        let err = execute(&ctx, "Anything?", false).unwrap_err();
        assert!(matches!(err, AppError::NoCurrentAnalysis));
        assert_eq!(ctx.model().generate_calls(), 0);
    }

    #[test]
    fn blank_question_fails_before_any_call() {
        let ctx = ctx_with_current();
        let err = execute(&ctx, "  ", false).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest { .. }));
        assert_eq!(ctx.model().generate_calls(), 0);
    }
}
