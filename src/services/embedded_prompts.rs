//! Embedded prompt template store.

use include_dir::{Dir, include_dir};

use crate::domain::prompt::PromptError;
use crate::ports::{PromptKind, PromptStore};

static PROMPTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

/// Prompt store serving the templates compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedPromptStore;

impl EmbeddedPromptStore {
    pub fn new() -> Self {
        Self
    }
}

impl PromptStore for EmbeddedPromptStore {
    fn template(&self, kind: PromptKind) -> Result<&str, PromptError> {
        PROMPTS_DIR
            .get_file(kind.asset_name())
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| PromptError::TemplateNotFound(kind.asset_name().to_string()))
    }
}
