//! Tool adapters the agent can invoke.
//!
//! Every tool implements the [`Tool`] trait (name / description / parameter
//! schema / `forward`). A [`ToolRegistry`] maps names to implementations; the
//! agent loop never matches on a concrete tool type. Transport failures are
//! encoded as text by the adapters themselves, so `forward` only errors on
//! malformed arguments.

mod news_search;
mod web_crawler;
mod web_search;

pub use news_search::NewsSearchTool;
pub use web_crawler::WebCrawlerTool;
pub use web_search::WebSearchTool;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

/// A named, schema-described callable offered to the model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a registry; the model selects tools by this.
    fn name(&self) -> &str;

    /// Human-readable description the model uses to pick a tool.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Invoke the tool. Provider failures come back as `Ok` error text so the
    /// agent always has something to reason over; `Err` is reserved for
    /// malformed arguments.
    async fn forward(&self, args: Value) -> anyhow::Result<String>;
}

/// Name-keyed set of tools handed to one agent.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
    }

    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    /// OpenAI function-calling schemas for every registered tool.
    pub fn tool_schemas(&self) -> Vec<Value> {
        self.tools
            .values()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Execute a tool by name.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown tool name or malformed arguments; the
    /// agent loop folds these into tool-result text for the model to retry.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;
        tool.forward(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the provided text."
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Text to echo" }
                },
                "required": ["text"]
            })
        }

        async fn forward(&self, args: Value) -> anyhow::Result<String> {
            let text = args["text"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("Missing 'text' argument"))?;
            Ok(text.to_string())
        }
    }

    #[tokio::test]
    async fn execute_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let result = registry
            .execute("echo", json!({"text": "hello"}))
            .await
            .expect("echo succeeds");
        assert_eq!(result, "hello");
    }

    #[tokio::test]
    async fn execute_unknown_tool_errors() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("nope", json!({}))
            .await
            .expect_err("unknown tool must error");
        assert!(err.to_string().contains("Unknown tool: nope"));
    }

    #[test]
    fn tool_schemas_use_function_calling_shape() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let schemas = registry.tool_schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0]["type"], "function");
        assert_eq!(schemas[0]["function"]["name"], "echo");
        assert_eq!(schemas[0]["function"]["parameters"]["type"], "object");
    }
}
