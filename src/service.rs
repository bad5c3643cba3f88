//! Research service: the process-wide agent instance and its operations.
//!
//! One [`ResearchService`] is constructed per process (lazily, on the first
//! request) and shared by every in-flight run. It owns the wired-up agent and
//! model client; per-run state never lives here, so concurrent use is safe.

use std::sync::Arc;

use crate::agent::{build_research_prompt, extract_json_body, normalize, Agent, ResearchResult};
use crate::api::types::Format;
use crate::config::Config;
use crate::llm::{ChatMessage, GeminiClient, LlmClient, Role};
use crate::tools::{NewsSearchTool, ToolRegistry, WebCrawlerTool, WebSearchTool};

pub struct ResearchService {
    agent: Agent,
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl ResearchService {
    /// Wire the model client and the three provider tools into one agent.
    ///
    /// Credentials come from the already-validated [`Config`]; a missing key
    /// is caught at startup, never here.
    pub fn new(config: &Config) -> Self {
        let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.temperature,
        ));

        let mut tools = ToolRegistry::new();
        tools.register(WebSearchTool::new(config.serper_api_key.clone()));
        tools.register(WebCrawlerTool::new(config.serper_api_key.clone()));
        tools.register(NewsSearchTool::new(config.serper_api_key.clone()));

        let agent = Agent::new(Arc::clone(&llm), tools, config);

        Self {
            agent,
            llm,
            model: config.default_model.clone(),
        }
    }

    /// Build a service around pre-wired parts (useful for testing).
    pub fn with_parts(agent: Agent, llm: Arc<dyn LlmClient>, model: String) -> Self {
        Self { agent, llm, model }
    }

    /// Run the research agent against a query and return the normalized
    /// result.
    ///
    /// Never fails: errors escaping the run collapse into a structured result
    /// whose `research_data` carries the error text.
    pub async fn run_research(&self, query: &str) -> ResearchResult {
        let task = build_research_prompt(query);

        match self.agent.run(&task).await {
            Ok(outcome) => {
                tracing::debug!(
                    run_id = %outcome.run_id,
                    steps = outcome.steps.len(),
                    completion_tokens = outcome.completion_tokens,
                    "research run complete"
                );
                normalize(outcome.output)
            }
            Err(e) => {
                tracing::error!("Research agent error: {:#}", e);
                ResearchResult {
                    research_data: format!("Error running research agent: {}", e),
                    resource_links: Vec::new(),
                }
            }
        }
    }

    /// One-shot model call converting content into a formatted summary with
    /// references.
    pub async fn format_content(&self, prompt: &str) -> anyhow::Result<Format> {
        let instruction = format!(
            "Convert the given content to highly formatted text with a summary and references. \
             Respond with a single JSON object with exactly two fields: \"Summary\" (string) and \
             \"Reference\" (array of source strings). - content to format - {}",
            prompt
        );

        let messages = vec![ChatMessage {
            role: Role::User,
            content: Some(instruction),
            tool_calls: None,
            tool_call_id: None,
        }];

        let response = self.llm.chat_completion(&self.model, &messages, None).await?;
        let content = response
            .content
            .ok_or_else(|| anyhow::anyhow!("model returned no content"))?;

        let format: Format = serde_json::from_str(extract_json_body(&content))?;
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatResponse;
    use async_trait::async_trait;
    use serde_json::Value;

    struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[Value]>,
        ) -> anyhow::Result<ChatResponse> {
            anyhow::bail!("provider unreachable")
        }
    }

    struct CannedLlm(String);

    #[async_trait]
    impl LlmClient for CannedLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[Value]>,
        ) -> anyhow::Result<ChatResponse> {
            Ok(ChatResponse {
                content: Some(self.0.clone()),
                tool_calls: None,
                completion_tokens: Some(1),
            })
        }
    }

    fn service_with(llm: Arc<dyn LlmClient>) -> ResearchService {
        let config = Config::new("model-key".to_string(), "search-key".to_string());
        let agent = Agent::new(Arc::clone(&llm), ToolRegistry::new(), &config);
        ResearchService::with_parts(agent, llm, config.default_model)
    }

    #[tokio::test]
    async fn run_research_collapses_errors_into_structured_result() {
        let service = service_with(Arc::new(FailingLlm));

        let result = service.run_research("anything").await;
        assert!(result
            .research_data
            .starts_with("Error running research agent:"));
        assert!(result.resource_links.is_empty());
    }

    #[tokio::test]
    async fn run_research_normalizes_terminal_output() {
        let service = service_with(Arc::new(CannedLlm(
            r#"{"research_data": "report", "resource_links": ["https://a.example"]}"#.to_string(),
        )));

        let result = service.run_research("topic").await;
        assert_eq!(result.research_data, "report");
        assert_eq!(result.resource_links, vec!["https://a.example"]);
    }

    #[tokio::test]
    async fn empty_query_never_errors() {
        let service = service_with(Arc::new(CannedLlm("No Topic Mentioned".to_string())));

        let result = service.run_research("").await;
        assert_eq!(result.research_data, "No Topic Mentioned");
        assert!(result.resource_links.is_empty());
    }

    #[tokio::test]
    async fn format_content_parses_fenced_json() {
        let service = service_with(Arc::new(CannedLlm(
            "```json\n{\"Summary\": \"short\", \"Reference\": [\"src\"]}\n```".to_string(),
        )));

        let format = service.format_content("some content").await.unwrap();
        assert_eq!(format.summary, "short");
        assert_eq!(format.reference, vec!["src"]);
    }

    #[tokio::test]
    async fn format_content_propagates_provider_failure() {
        let service = service_with(Arc::new(FailingLlm));
        assert!(service.format_content("content").await.is_err());
    }
}
