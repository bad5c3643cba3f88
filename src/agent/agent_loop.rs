//! Core agent loop implementation.
//!
//! One run is an explicit state machine: `Running` asks the model for the
//! next action, `AwaitingTools` executes the requested tool calls in order,
//! and the run ends in `Terminated` (with raw output to normalize) or
//! `Failed`. Step and token budgets are checked on every `Running` entry;
//! exhausting either force-terminates with the best available partial answer
//! rather than failing the run.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, Role, ToolCall};
use crate::tools::ToolRegistry;

use super::normalize::RawOutput;
use super::prompt::build_system_prompt;

/// Stand-in answer when the budget runs out before any assistant content.
const BUDGET_EXHAUSTED_NOTE: &str =
    "Research budget exhausted before a final answer was produced.";

/// The research agent: model client, tool set, and run budgets.
///
/// Holds no per-run state; one instance serves concurrent runs.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_steps: usize,
    max_completion_tokens: u32,
    verbosity: u8,
}

/// One recorded event of a run, in order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StepRecord {
    /// Timestamp (ISO 8601)
    pub timestamp: String,

    pub kind: StepKind,

    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    ToolCall,
    ToolResult,
    Response,
}

/// Terminal result of a run.
#[derive(Debug)]
pub struct RunOutcome {
    pub run_id: Uuid,

    /// Whatever the model produced on its terminal step
    pub output: RawOutput,

    /// Ordered trace of the run
    pub steps: Vec<StepRecord>,

    /// Completion tokens spent across all steps
    pub completion_tokens: u32,
}

enum RunState {
    Running {
        step: usize,
    },
    AwaitingTools {
        step: usize,
        content: Option<String>,
        calls: Vec<ToolCall>,
    },
    Terminated {
        output: RawOutput,
    },
    Failed {
        error: anyhow::Error,
    },
}

impl Agent {
    /// Create a new agent over the given model client and tool set.
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, config: &Config) -> Self {
        Self {
            llm,
            tools,
            model: config.default_model.clone(),
            max_steps: config.max_steps,
            max_completion_tokens: config.max_completion_tokens,
            verbosity: config.verbosity,
        }
    }

    /// Drive one task to its terminal output.
    ///
    /// All run state (history, trace, counters) is local to this call; the
    /// agent itself is read-only during a run.
    ///
    /// # Errors
    ///
    /// Fails only on unrecoverable conditions: a model transport error or an
    /// empty model response. Unknown tools, malformed invocations, and
    /// provider failures are fed back to the model as tool-result text.
    pub async fn run(&self, task: &str) -> anyhow::Result<RunOutcome> {
        let run_id = Uuid::new_v4();
        let tool_schemas = self.tools.tool_schemas();

        let mut messages = vec![
            ChatMessage {
                role: Role::System,
                content: Some(build_system_prompt(&self.tools)),
                tool_calls: None,
                tool_call_id: None,
            },
            ChatMessage {
                role: Role::User,
                content: Some(task.to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
        ];

        let mut steps: Vec<StepRecord> = Vec::new();
        let mut tokens_spent: u32 = 0;
        let mut last_content: Option<String> = None;
        let mut state = RunState::Running { step: 0 };

        loop {
            state = match state {
                RunState::Running { step } => {
                    if step >= self.max_steps || tokens_spent >= self.max_completion_tokens {
                        let partial = last_content
                            .clone()
                            .unwrap_or_else(|| BUDGET_EXHAUSTED_NOTE.to_string());
                        tracing::warn!(
                            %run_id,
                            step,
                            tokens_spent,
                            "budget exhausted, terminating with partial answer"
                        );
                        record(&mut steps, StepKind::Response, &partial);
                        RunState::Terminated {
                            output: RawOutput::from_text(partial),
                        }
                    } else {
                        tracing::debug!(%run_id, step, tokens_spent, "agent step");
                        match self
                            .llm
                            .chat_completion(&self.model, &messages, Some(&tool_schemas))
                            .await
                        {
                            Ok(response) => {
                                if let Some(spent) = response.completion_tokens {
                                    tokens_spent += spent;
                                }

                                let calls = response.tool_calls.unwrap_or_default();
                                if !calls.is_empty() {
                                    if let Some(content) = &response.content {
                                        last_content = Some(content.clone());
                                    }
                                    RunState::AwaitingTools {
                                        step,
                                        content: response.content,
                                        calls,
                                    }
                                } else if let Some(content) = response.content {
                                    self.emit(1, &format!("final response after {} steps", step));
                                    record(&mut steps, StepKind::Response, &content);
                                    RunState::Terminated {
                                        output: RawOutput::from_text(content),
                                    }
                                } else {
                                    RunState::Failed {
                                        error: anyhow::anyhow!(
                                            "model returned neither content nor tool calls"
                                        ),
                                    }
                                }
                            }
                            Err(error) => RunState::Failed { error },
                        }
                    }
                }

                RunState::AwaitingTools {
                    step,
                    content,
                    calls,
                } => {
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content,
                        tool_calls: Some(calls.clone()),
                        tool_call_id: None,
                    });

                    // Each result is appended before the next step begins, so
                    // the model always sees every outcome of its own requests.
                    for call in &calls {
                        self.emit(
                            2,
                            &format!(
                                "calling tool: {} with args: {}",
                                call.function.name, call.function.arguments
                            ),
                        );
                        record(
                            &mut steps,
                            StepKind::ToolCall,
                            &format!("{}({})", call.function.name, call.function.arguments),
                        );

                        let result_text = match self.execute_tool_call(call).await {
                            Ok(output) => output,
                            // Unknown tool or malformed invocation: recoverable,
                            // handed back for the model to correct.
                            Err(e) => format!("Error: {}", e),
                        };

                        self.emit(2, &truncate(&result_text, 200));
                        record(&mut steps, StepKind::ToolResult, &truncate(&result_text, 1000));

                        messages.push(ChatMessage {
                            role: Role::Tool,
                            content: Some(result_text),
                            tool_calls: None,
                            tool_call_id: Some(call.id.clone()),
                        });
                    }

                    RunState::Running { step: step + 1 }
                }

                RunState::Terminated { output } => {
                    return Ok(RunOutcome {
                        run_id,
                        output,
                        steps,
                        completion_tokens: tokens_spent,
                    });
                }

                RunState::Failed { error } => return Err(error),
            };
        }
    }

    async fn execute_tool_call(&self, call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value =
            serde_json::from_str(&call.function.arguments).unwrap_or(serde_json::Value::Null);
        self.tools.execute(&call.function.name, args).await
    }

    /// Verbosity-gated observability; never affects the outcome.
    fn emit(&self, min_verbosity: u8, message: &str) {
        if self.verbosity >= min_verbosity {
            tracing::info!("{}", message);
        }
    }
}

fn record(steps: &mut Vec<StepRecord>, kind: StepKind, content: &str) {
    steps.push(StepRecord {
        timestamp: chrono::Utc::now().to_rfc3339(),
        kind,
        content: content.to_string(),
    });
}

/// Truncate a string for trace purposes, respecting char boundaries.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &s[..end])
}
