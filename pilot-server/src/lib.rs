//! Query assistant backend: an LLM plans tool calls (web-grounded search,
//! email), the calls run in order, and the LLM narrates the results.

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod markup;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod orchestrator;
pub mod tools;
