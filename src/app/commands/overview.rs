//! Combined condition overview: explanation and natural cures fetched
//! concurrently and joined.

use crate::app::AppContext;
use crate::app::commands::{cures, explain};
use crate::domain::{AppError, ConditionProfile, ExplainRequest, NaturalCures, NaturalCuresRequest};
use crate::ports::{JournalStore, ModelClient};

/// Run the explanation and cures flows for one condition concurrently.
///
/// The two calls are independent but the page shows them together, so
/// either failure fails the pair.
pub fn execute<M, J>(
    ctx: &AppContext<M, J>,
    condition: &str,
) -> Result<(ConditionProfile, NaturalCures), AppError>
where
    M: ModelClient,
    J: JournalStore + Sync,
{
    ExplainRequest { condition: condition.to_string() }.validate()?;

    let (profile, cures) = std::thread::scope(|scope| {
        let profile_handle = scope
            .spawn(|| explain::execute(ctx, ExplainRequest { condition: condition.to_string() }));
        let cures_handle = scope
            .spawn(|| cures::execute(ctx, NaturalCuresRequest { condition: condition.to_string() }));
        (join_worker(profile_handle), join_worker(cures_handle))
    });

    Ok((profile?, cures?))
}

fn join_worker<T>(handle: std::thread::ScopedJoinHandle<'_, Result<T, AppError>>) -> Result<T, AppError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(AppError::HttpTransport("flow worker panicked".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MemoryJournalStore, MockModelClient};
    use serde_json::json;

    fn profile_reply() -> serde_json::Value {
        json!({
            "diseaseName": "Acne",
            "severity": "Mild",
            "stage": "Early",
            "explanation": "Clogged pores leading to inflamed lesions.",
            "possibleCauses": ["Hormones", "Bacteria", "Diet"],
            "vitaminDeficiency": "Zinc deficiency is commonly linked to acne."
        })
    }

    fn cures_reply() -> serde_json::Value {
        json!({
            "naturalRemedies": ["Tea tree oil"],
            "recommendedFoods": ["Leafy greens"]
        })
    }

    #[test]
    fn both_flows_run_and_merge() {
        let ctx = AppContext::new(MockModelClient::new(), MemoryJournalStore::new());
        // The two flows race for the queued replies, so queue a superset
        // payload twice; each flow parses the fields it declares.
        let mut superset = profile_reply();
        for (key, value) in cures_reply().as_object().unwrap() {
            superset[key] = value.clone();
        }
        ctx.model().push_reply(superset.clone());
        ctx.model().push_reply(superset);

        let (profile, cures) = execute(&ctx, "Acne").unwrap();
        assert_eq!(profile.condition, "Acne");
        assert_eq!(cures.natural_remedies, vec!["Tea tree oil"]);
        assert_eq!(ctx.model().generate_calls(), 2);
    }

    #[test]
    fn blank_condition_fails_before_any_call() {
        let ctx = AppContext::new(MockModelClient::new(), MemoryJournalStore::new());
        let err = execute(&ctx, "   ").unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest { .. }));
        assert_eq!(ctx.model().generate_calls(), 0);
    }
}
