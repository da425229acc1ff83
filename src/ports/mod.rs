mod journal_store;
mod model_client;
mod prompt_store;
mod tool;

pub use journal_store::{JournalStore, MemoryJournalStore};
pub use model_client::{MockModelClient, ModelClient, ModelRequest};
pub use prompt_store::{PromptKind, PromptStore};
pub use tool::{StubProductSearch, ToolHandler};
