use std::io;

use thiserror::Error;

/// Library-wide error type for dermalens operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A request field is missing or malformed. Raised before any model call.
    #[error("Invalid request field '{field}': {reason}")]
    InvalidRequest { field: String, reason: String },

    /// The model's reply could not be coerced to the flow's output shape.
    #[error("Malformed reply from model in {flow} flow: {reason}")]
    MalformedReply { flow: String, reason: String },

    /// The model's reply parsed but violated a semantic constraint.
    #[error("Invalid reply field '{field}': {reason}")]
    InvalidReply { field: String, reason: String },

    /// The model endpoint rejected the call with 429.
    #[error("Model endpoint rate limited (429){}", retry_after_ms.map(|ms| format!(", retry_after_ms={}", ms)).unwrap_or_default())]
    RateLimited { retry_after_ms: Option<u64> },

    /// The model endpoint answered with a 5xx status.
    #[error("Model endpoint server error ({status})")]
    ServerError { status: u16 },

    /// The model endpoint answered with a non-retryable error status.
    #[error("Model API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    HttpTransport(String),

    /// A bound tool handler failed while the model was mid-generation.
    #[error("Tool '{tool}' failed: {reason}")]
    ToolFailed { tool: String, reason: String },

    /// The model kept requesting the same tool instead of answering.
    #[error("Model requested tool '{tool}' again after receiving its result")]
    ToolLoop { tool: String },

    /// GEMINI_API_KEY is not set.
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    /// Configuration value out of range or otherwise unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error in config.toml.
    #[error("Config parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// A flow that needs a saved analysis was invoked before `analyze`.
    #[error("No saved analysis found. Run 'derma analyze <IMAGE>' first.")]
    NoCurrentAnalysis,

    /// Journal entry id (or prefix) matched nothing.
    #[error("Journal entry '{0}' not found")]
    EntryNotFound(String),

    /// Journal entry id prefix matched more than one entry.
    #[error("Journal entry id '{0}' is ambiguous; use more characters")]
    AmbiguousEntryId(String),

    /// A store file exists but does not parse. Never silently reset.
    #[error("Store file {path} is corrupted: {reason}")]
    StoreCorrupted { path: String, reason: String },

    /// Prompt template rendering failed.
    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] crate::domain::prompt::PromptError),
}

impl AppError {
    pub fn invalid_request<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        AppError::InvalidRequest { field: field.into(), reason: reason.into() }
    }

    pub fn invalid_reply<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        AppError::InvalidReply { field: field.into(), reason: reason.into() }
    }

    pub fn malformed_reply<F: Into<String>, R: Into<String>>(flow: F, reason: R) -> Self {
        AppError::MalformedReply { flow: flow.into(), reason: reason.into() }
    }

    /// Whether a retrying client may re-attempt the call.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::RateLimited { .. } | AppError::ServerError { .. } | AppError::HttpTransport(_)
        )
    }
}
