//! Follow-up consultation chat: transcript model and answer record.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::validation::require_request_field;
use crate::domain::{AppError, SkinAnalysis};

/// Standard disclaimer appended when the model's answer lacks one.
pub const DISCLAIMER: &str = "Please remember: I am an AI assistant, not a doctor. \
     Consult a medical professional for an accurate diagnosis and treatment.";

/// Phrases accepted as evidence the answer already carries a disclaimer.
const DISCLAIMER_MARKERS: [&str; 3] = ["medical professional", "not a doctor", "healthcare provider"];

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in the consultation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Append-only ordered conversation history.
///
/// Serialized to JSON for persistence and rendered to plain text when fed
/// back into the follow-up prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) {
        self.turns.push(ConversationTurn { role, text: text.into() });
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the history section of the follow-up prompt.
    ///
    /// An empty transcript renders an explicit placeholder so the template
    /// keeps the same structure on the first question.
    pub fn render(&self) -> String {
        if self.turns.is_empty() {
            return "(no prior conversation)".to_string();
        }
        self.turns
            .iter()
            .map(|turn| {
                let speaker = match turn.role {
                    ChatRole::User => "User",
                    ChatRole::Assistant => "Advisor",
                };
                format!("{}: {}", speaker, turn.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Input to the follow-up flow.
#[derive(Debug, Clone)]
pub struct FollowUpRequest {
    /// The original analysis the consultation is about.
    pub analysis: SkinAnalysis,
    /// The user's new question.
    pub question: String,
    /// Conversation so far, possibly empty.
    pub history: Transcript,
}

impl FollowUpRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_request_field("question", &self.question)
    }
}

/// Answer to a follow-up question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpAnswer {
    pub answer: String,
}

impl FollowUpAnswer {
    /// Guarantee the answer carries a medical disclaimer.
    ///
    /// The prompt instructs the model to include one, but the contract must
    /// hold regardless of what the model returns.
    pub fn ensure_disclaimer(mut self) -> Self {
        let lower = self.answer.to_lowercase();
        if !DISCLAIMER_MARKERS.iter().any(|marker| lower.contains(marker)) {
            if !self.answer.is_empty() {
                self.answer.push_str("\n\n");
            }
            self.answer.push_str(DISCLAIMER);
        }
        self
    }

    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": { "answer": { "type": "STRING" } },
            "required": ["answer"]
        })
    }
}
