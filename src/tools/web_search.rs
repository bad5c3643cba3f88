//! Web search via the Serper.dev API.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

const SEARCH_ENDPOINT: &str = "https://google.serper.dev/search";

/// Searches the web through Serper.dev and returns the raw result JSON.
pub struct WebSearchTool {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, SEARCH_ENDPOINT.to_string())
    }

    /// Point the tool at a different endpoint (used by tests).
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            client: provider_client(),
            api_key,
            endpoint,
        }
    }
}

/// Shared client settings for Serper.dev calls: one call per invocation,
/// 30 second timeout, no retry.
pub(super) fn provider_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_default()
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Performs a web search using the Serper.dev API and returns the results, including links and snippets. Use for finding authoritative sources on a topic."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to send to the Serper.dev API"
                }
            },
            "required": ["query"]
        })
    }

    async fn forward(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "q": query }))
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                let msg = format!("Error performing web search: {}", e);
                tracing::error!("{}", msg);
                return Ok(msg);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let msg = format!("Error performing web search: provider returned {}", status);
            tracing::error!("{}", msg);
            return Ok(msg);
        }

        Ok(response
            .text()
            .await
            .unwrap_or_else(|e| format!("Error performing web search: {}", e)))
    }
}
