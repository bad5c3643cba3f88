//! # Research Agent
//!
//! A research-automation service driven by a tool-augmented LLM agent.
//!
//! This library provides:
//! - An HTTP API for submitting research queries
//! - A tool-based agent loop over web search, page crawling, and news search
//! - Normalization of model output into a canonical result schema
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a query via the API
//! 2. Render the research task document and system prompt
//! 3. Call the model, execute any requested tool calls, feed results back
//! 4. Repeat until a terminal answer or a step/token budget runs out
//! 5. Normalize the terminal output into `{research_data, resource_links}`
//!
//! ## Example
//!
//! ```rust,ignore
//! use research_agent::{config::Config, service::ResearchService};
//!
//! let config = Config::from_env()?;
//! let service = ResearchService::new(&config);
//! let result = service.run_research("history of the transistor").await;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod service;
pub mod tools;

pub use config::Config;
