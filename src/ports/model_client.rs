//! Model endpoint port definition.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::domain::{AppError, ImagePayload};
use crate::ports::ToolHandler;

/// One structured completion request.
///
/// Carries the rendered prompt, an optional image attachment, the output
/// schema the model must conform to, and at most one tool the model may
/// invoke mid-generation.
pub struct ModelRequest<'a> {
    /// Rendered prompt text.
    pub prompt: String,
    /// Optional image attachment.
    pub image: Option<ImagePayload>,
    /// Schema constraint for the reply, in the wire's schema dialect.
    pub response_schema: Option<Value>,
    /// Optional callable tool.
    pub tool: Option<&'a dyn ToolHandler>,
}

impl<'a> ModelRequest<'a> {
    /// A schema-constrained request with no attachments.
    pub fn structured(prompt: String, response_schema: Value) -> Self {
        Self { prompt, image: None, response_schema: Some(response_schema), tool: None }
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_tool(mut self, tool: &'a dyn ToolHandler) -> Self {
        self.tool = Some(tool);
        self
    }
}

impl Clone for ModelRequest<'_> {
    fn clone(&self) -> Self {
        Self {
            prompt: self.prompt.clone(),
            image: self.image.clone(),
            response_schema: self.response_schema.clone(),
            tool: self.tool,
        }
    }
}

impl std::fmt::Debug for ModelRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRequest")
            .field("prompt", &format!("{} chars", self.prompt.len()))
            .field("image", &self.image)
            .field("has_schema", &self.response_schema.is_some())
            .field("tool", &self.tool.map(|t| t.name().to_string()))
            .finish()
    }
}

/// Port for model endpoint operations.
///
/// `Send + Sync` so fan-out flows can share one client across worker
/// threads. Implementations perform exactly one logical completion per
/// call; retrying belongs to a decorator, never the flow layer.
pub trait ModelClient: Send + Sync {
    /// Request one structured completion and return the raw parsed JSON.
    fn generate(&self, request: ModelRequest<'_>) -> Result<Value, AppError>;

    /// Request one generated image.
    fn generate_image(&self, prompt: &str) -> Result<ImagePayload, AppError>;
}

enum MockReply {
    Json(Value),
    Image(ImagePayload),
    Fail(String),
}

/// Scriptable mock client for testing without API calls.
///
/// Replies are consumed in FIFO order; an exhausted queue fails loudly.
/// Call counters double as spies for "no external call was made" checks.
#[derive(Default)]
pub struct MockModelClient {
    replies: Mutex<VecDeque<MockReply>>,
    image_replies: Mutex<VecDeque<MockReply>>,
    generate_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a structured reply.
    pub fn push_reply(&self, value: Value) {
        self.replies.lock().unwrap().push_back(MockReply::Json(value));
    }

    /// Queue a failure for the next structured call.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.replies.lock().unwrap().push_back(MockReply::Fail(message.into()));
    }

    /// Queue a generated image.
    pub fn push_image(&self, image: ImagePayload) {
        self.image_replies.lock().unwrap().push_back(MockReply::Image(image));
    }

    /// Queue a failure for the next image call.
    pub fn push_image_failure(&self, message: impl Into<String>) {
        self.image_replies.lock().unwrap().push_back(MockReply::Fail(message.into()));
    }

    /// Number of structured completions requested so far.
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// Number of image generations requested so far.
    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

impl ModelClient for MockModelClient {
    fn generate(&self, _request: ModelRequest<'_>) -> Result<Value, AppError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().unwrap().pop_front() {
            Some(MockReply::Json(value)) => Ok(value),
            Some(MockReply::Fail(message)) => Err(AppError::ApiError { status: 503, message }),
            Some(MockReply::Image(_)) => {
                Err(AppError::ApiError { status: 500, message: "image queued for text call".into() })
            }
            None => {
                Err(AppError::ApiError { status: 500, message: "mock replies exhausted".into() })
            }
        }
    }

    fn generate_image(&self, _prompt: &str) -> Result<ImagePayload, AppError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        match self.image_replies.lock().unwrap().pop_front() {
            Some(MockReply::Image(image)) => Ok(image),
            Some(MockReply::Fail(message)) => Err(AppError::ApiError { status: 503, message }),
            Some(MockReply::Json(_)) => {
                Err(AppError::ApiError { status: 500, message: "text queued for image call".into() })
            }
            None => {
                Err(AppError::ApiError { status: 500, message: "mock images exhausted".into() })
            }
        }
    }
}
