//! Image generation, single and batched.

use crate::domain::validation::require_request_field;
use crate::domain::{AppError, ImageOutcome, ImagePayload};
use crate::ports::ModelClient;

/// Generate one image.
pub fn execute<M: ModelClient>(model: &M, prompt: &str) -> Result<ImagePayload, AppError> {
    require_request_field("prompt", prompt)?;
    model.generate_image(prompt.trim())
}

/// Generate one image per prompt, concurrently, with per-slot failure
/// isolation.
///
/// Every prompt resolves independently: the result always has the same
/// cardinality as the input, with failed slots carrying the error message
/// instead of aborting the batch.
pub fn execute_batch<M: ModelClient>(model: &M, prompts: &[String]) -> Vec<ImageOutcome> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = prompts
            .iter()
            .map(|prompt| scope.spawn(move || execute(model, prompt)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(Ok(image)) => ImageOutcome::Generated(image),
                Ok(Err(error)) => ImageOutcome::Failed(error.to_string()),
                Err(_) => ImageOutcome::Failed("image worker panicked".to_string()),
            })
            .collect()
    })
}
