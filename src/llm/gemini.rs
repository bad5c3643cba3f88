//! Gemini client via the provider's OpenAI-compatible endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ChatMessage, ChatResponse, LlmClient, ToolCall};

const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Client for Google's Gemini models through the OpenAI-compatible surface.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: String, temperature: f32) -> Self {
        Self::with_base_url(api_key, temperature, GEMINI_OPENAI_BASE.to_string())
    }

    /// Point the client at a different base URL (used by tests).
    pub fn with_base_url(api_key: String, temperature: f32, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url,
            temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    completion_tokens: u32,
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> anyhow::Result<ChatResponse> {
        let mut body = json!({
            "model": model,
            "messages": messages,
            "temperature": self.temperature,
        });

        if let Some(tools) = tools {
            if !tools.is_empty() {
                body["tools"] = json!(tools);
            }
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Model provider returned {}: {}", status, detail);
        }

        let completion: CompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Model provider returned no choices"))?;

        Ok(ChatResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            completion_tokens: completion.usage.map(|u| u.completion_tokens),
        })
    }
}
