use thiserror::Error;

use super::PromptContext;

/// Error during prompt rendering.
#[derive(Debug, Clone, Error)]
pub enum PromptError {
    /// No template is registered for the requested flow.
    #[error("Prompt template not found: {0}")]
    TemplateNotFound(String),

    /// The template uses syntax the renderer does not allow.
    #[error("Template '{template}' uses disallowed syntax: {token}")]
    SyntaxNotAllowed { template: String, token: String },

    /// Rendering failed, typically an undefined variable.
    #[error("Failed to render template '{template}': {reason}")]
    RenderError { template: String, reason: String },
}

/// Trait for rendering prompt templates.
///
/// Substitution is literal: variable values are data, never re-evaluated as
/// template syntax, even when they contain delimiter-like sequences.
pub trait TemplateRenderer {
    /// Render a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - The template string to render.
    /// * `context` - The context variables to use for rendering.
    /// * `template_name` - A name for the template (for error reporting).
    fn render(
        &self,
        template: &str,
        context: &PromptContext,
        template_name: &str,
    ) -> Result<String, PromptError>;
}
