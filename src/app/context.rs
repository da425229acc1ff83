use crate::domain::AppError;
use crate::domain::prompt::{PromptContext, TemplateRenderer};
use crate::ports::{JournalStore, ModelClient, PromptKind, PromptStore};
use crate::services::{EmbeddedPromptStore, MinijinjaTemplateRenderer};

/// Application context holding dependencies for flow execution.
///
/// The model client and journal store vary (HTTP vs mock, filesystem vs
/// memory); the prompt store and renderer are fixed embedded singletons.
pub struct AppContext<M: ModelClient, J: JournalStore> {
    model: M,
    store: J,
    prompts: EmbeddedPromptStore,
    renderer: MinijinjaTemplateRenderer,
}

impl<M: ModelClient, J: JournalStore> AppContext<M, J> {
    /// Create a new application context.
    pub fn new(model: M, store: J) -> Self {
        Self {
            model,
            store,
            prompts: EmbeddedPromptStore::new(),
            renderer: MinijinjaTemplateRenderer::new(),
        }
    }

    /// Get a reference to the model client.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a reference to the journal store.
    pub fn store(&self) -> &J {
        &self.store
    }

    /// Render the prompt for a flow with the given variables.
    pub fn render_prompt(
        &self,
        kind: PromptKind,
        context: &PromptContext,
    ) -> Result<String, AppError> {
        let template = self.prompts.template(kind)?;
        Ok(self.renderer.render(template, context, kind.asset_name())?)
    }
}
