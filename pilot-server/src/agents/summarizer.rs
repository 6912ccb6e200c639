// Summarizer Agent: narrates tool results back to the user

use crate::error::Result;
use crate::llm::LlmClient;
use crate::models::{ChatMessage, ToolResult};
use std::sync::Arc;
use tracing::info;

const SYSTEM_PROMPT: &str =
    "You are an AI assistant that explains results to users in a clear and helpful way.";

pub struct SummarizerAgent {
    llm: Arc<dyn LlmClient>,
}

impl SummarizerAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn summarize(&self, history: &[ChatMessage], results: &[ToolResult]) -> Result<String> {
        info!("Summarizer: Narrating {} tool result(s)", results.len());

        let results_json = serde_json::to_string_pretty(results)?;
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::assistant(format!(
            "Here are the results from executing the tools: {results_json}. \
             Please provide a natural language response formatted in markdown only."
        )));

        Ok(self.llm.complete(&messages).await?)
    }
}
