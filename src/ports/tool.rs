//! Callable tool port.
//!
//! A tool is a named capability with a declared input schema that the model
//! may invoke mid-generation when it cannot compute something reliably
//! itself.

use serde_json::{Value, json};

use crate::domain::AppError;

/// A typed capability the model may call during a completion.
pub trait ToolHandler: Sync {
    /// Tool name as declared to the model.
    fn name(&self) -> &str;

    /// Human-readable description of when the model should call the tool.
    fn description(&self) -> &str;

    /// JSON schema of the tool's input, in the wire's schema dialect.
    fn parameters(&self) -> Value;

    /// Execute the tool with the model-supplied arguments.
    fn invoke(&self, args: Value) -> Result<Value, AppError>;
}

/// Stand-in product search with no catalog behind it.
///
/// Returns an empty hit list tagged with `"source": "stub"`, leaving the
/// model to propose products from its own knowledge. A real deployment
/// implements [`ToolHandler`] against a shopping API and passes it to
/// `recommend_products_with` instead.
#[derive(Debug, Clone, Default)]
pub struct StubProductSearch;

impl StubProductSearch {
    pub fn new() -> Self {
        Self
    }
}

impl ToolHandler for StubProductSearch {
    fn name(&self) -> &str {
        "searchShopping"
    }

    fn description(&self) -> &str {
        "Searches an online shopping database for skincare products that match \
         a query and are suitable for a specific skin condition."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "query": { "type": "STRING" },
                "skinCondition": { "type": "STRING" }
            },
            "required": ["query", "skinCondition"]
        })
    }

    fn invoke(&self, _args: Value) -> Result<Value, AppError> {
        Ok(json!({ "recommendations": [], "source": "stub" }))
    }
}
