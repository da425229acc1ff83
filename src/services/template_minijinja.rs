//! Template renderer using Minijinja.

use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};

use crate::domain::prompt::{PromptContext, PromptError, TemplateRenderer};

/// Template renderer using Minijinja.
///
/// Only variable substitution is allowed: statement and comment blocks are
/// rejected up front so templates stay pure text with placeholders, and
/// substituted values are never re-evaluated.
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinijinjaTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(
        &self,
        template: &str,
        context: &PromptContext,
        template_name: &str,
    ) -> Result<String, PromptError> {
        if let Some(token) = disallowed_template_token(template) {
            return Err(PromptError::SyntaxNotAllowed {
                template: template_name.to_string(),
                token: token.to_string(),
            });
        }

        let env = ENV.get_or_init(|| {
            let mut env = Environment::new();
            env.set_undefined_behavior(UndefinedBehavior::Strict);
            env
        });

        env.render_str(template, &context.variables).map_err(|err| PromptError::RenderError {
            template: template_name.to_string(),
            reason: err.to_string(),
        })
    }
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn disallowed_template_token(template: &str) -> Option<&'static str> {
    if template.contains("{%") {
        return Some("{%");
    }
    if template.contains("{#") {
        return Some("{#");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_variables() {
        let renderer = MinijinjaTemplateRenderer::new();
        let context = PromptContext::new().with_var("condition", "Eczema");
        let out = renderer.render("Condition: {{ condition }}", &context, "test").unwrap();
        assert_eq!(out, "Condition: Eczema");
    }

    #[test]
    fn substitution_is_literal_for_delimiter_like_values() {
        let renderer = MinijinjaTemplateRenderer::new();
        let context = PromptContext::new().with_var("question", "what does {{ weird }} mean?");
        let out = renderer.render("Q: {{ question }}", &context, "test").unwrap();
        assert_eq!(out, "Q: what does {{ weird }} mean?");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let renderer = MinijinjaTemplateRenderer::new();
        let err = renderer.render("{{ missing }}", &PromptContext::new(), "test").unwrap_err();
        assert!(matches!(err, PromptError::RenderError { .. }));
    }

    #[test]
    fn statement_blocks_are_rejected() {
        let renderer = MinijinjaTemplateRenderer::new();
        let err = renderer
            .render("{% if x %}never{% endif %}", &PromptContext::new(), "test")
            .unwrap_err();
        assert!(matches!(err, PromptError::SyntaxNotAllowed { .. }));
    }
}
