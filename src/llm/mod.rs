//! LLM client abstraction and chat wire types.
//!
//! The agent talks to the model provider through the [`LlmClient`] trait so
//! the loop can be driven by a scripted client in tests. Wire types follow
//! the OpenAI chat-completions shape, which the Gemini provider also speaks.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool calls requested by the assistant (assistant messages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Id of the tool call this message answers (tool messages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,

    #[serde(rename = "type", default = "function_call_type")]
    pub call_type: String,

    pub function: FunctionCall,
}

/// The function half of a tool call: which tool, and JSON-encoded arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

fn function_call_type() -> String {
    "function".to_string()
}

/// The parts of a completion the agent loop consumes.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Assistant text, if any
    pub content: Option<String>,

    /// Tool calls the model wants executed, if any
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Completion tokens spent on this call, when the provider reports usage
    pub completion_tokens: Option<u32>,
}

/// Client for a chat-completion model provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one chat completion over the given history, optionally offering
    /// the model a set of callable tools (OpenAI function-calling schemas).
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> anyhow::Result<ChatResponse>;
}
