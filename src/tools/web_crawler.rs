//! Page content extraction via the Serper.dev scraping API.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::web_search::provider_client;
use super::Tool;

const SCRAPE_ENDPOINT: &str = "https://scrape.serper.dev";

/// Sentinel returned when a crawled page yields no extractable text. This is
/// ordinary output, not an error; the agent is expected to move on.
const NO_CONTENT: &str = "No text content found";

/// Extracts the text content of a URL through Serper.dev's scraper.
pub struct WebCrawlerTool {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl WebCrawlerTool {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, SCRAPE_ENDPOINT.to_string())
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
impl Tool for WebCrawlerTool {
    fn name(&self) -> &str {
        "web_crawler"
    }

    fn description(&self) -> &str {
        "Crawls and extracts all content from a specified URL using the Serper.dev API. Use to read the pages found by web_search."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL of the web page to crawl and extract content from"
                }
            },
            "required": ["url"]
        })
    }

    async fn forward(&self, args: Value) -> anyhow::Result<String> {
        let url = args["url"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'url' argument"))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "url": url }))
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                let msg = format!("Error crawling URL '{}': {}", url, e);
                tracing::error!("{}", msg);
                return Ok(msg);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let msg = format!("Error crawling URL '{}': provider returned {}", url, status);
            tracing::error!("{}", msg);
            return Ok(msg);
        }

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                let msg = format!("Error decoding crawl response for '{}': {}", url, e);
                tracing::error!("{}", msg);
                return Ok(msg);
            }
        };

        tracing::debug!("Crawled URL: {}", url);

        Ok(payload["text"]
            .as_str()
            .unwrap_or(NO_CONTENT)
            .to_string())
    }
}
