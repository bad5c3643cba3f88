//! Agent module - the core research orchestration logic.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with the system prompt and the research task document
//! 2. Call the model with the available search/crawl/news tools
//! 3. If the model requests tool calls, execute them and feed results back
//! 4. Repeat until the model produces a terminal answer or a budget runs out
//!
//! The terminal answer then passes through [`normalize`] to become the
//! canonical [`ResearchResult`].

mod agent_loop;
mod normalize;
mod prompt;

pub use agent_loop::{Agent, RunOutcome, StepKind, StepRecord};
pub use normalize::{normalize, RawOutput, ResearchResult};
pub use prompt::{build_research_prompt, build_system_prompt};

pub(crate) use normalize::extract_json_body;
