//! News search via the Serper.dev API.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::web_search::provider_client;
use super::Tool;

const NEWS_ENDPOINT: &str = "https://google.serper.dev/news";

/// Fetches recent news coverage through Serper.dev.
pub struct NewsSearchTool {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl NewsSearchTool {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, NEWS_ENDPOINT.to_string())
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

#[async_trait]
impl Tool for NewsSearchTool {
    fn name(&self) -> &str {
        "news_search"
    }

    fn description(&self) -> &str {
        "Fetches news articles using the Serper.dev API based on a search query. Use for recent coverage and timelines of developments."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query for news articles (e.g., 'software developer')"
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
                let msg = format!("Error fetching news: {}", e);
                tracing::error!("{}", msg);
                return Ok(msg);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let msg = format!("Error fetching news: provider returned {}", status);
            tracing::error!("{}", msg);
            return Ok(msg);
        }

        Ok(response
            .text()
            .await
            .unwrap_or_else(|e| format!("Error fetching news: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forward_requires_query_argument() {
        let tool = NewsSearchTool::new("key".to_string());
        let err = tool
            .forward(json!({"q": "wrong name"}))
            .await
            .expect_err("missing argument must error");
        assert!(err.to_string().contains("Missing 'query' argument"));
    }

    #[tokio::test]
    async fn forward_encodes_transport_failure_as_text() {
        let tool =
            NewsSearchTool::with_endpoint("key".to_string(), "http://127.0.0.1:1".to_string());
        let out = tool
            .forward(json!({"query": "ai news"}))
            .await
            .expect("transport failures never escape the adapter");
        assert!(out.starts_with("Error fetching news:"));
    }
}
