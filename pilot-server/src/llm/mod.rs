//! Text-generation client used for planning, search and narration.

mod gemini;

pub use gemini::GeminiClient;

use crate::models::{ChatMessage, Role};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected LLM response: {0}")]
    Malformed(String),
}

/// A single generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Let the model ground its answer with web search.
    pub web_search: bool,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            web_search: false,
        }
    }

    pub fn with_web_search(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            web_search: true,
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the text parts of the first candidate, in order.
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<String>, LlmError>;

    /// Convenience for callers that want a single string.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let parts = self
            .generate(&GenerateRequest::text(render_transcript(messages)))
            .await?;
        Ok(parts.concat())
    }
}

/// Flattens a conversation into one prompt, one labelled line per turn.
pub fn render_transcript(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for message in messages {
        let label = match message.role {
            Role::System => "(System Instruction)",
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::Other => continue,
        };
        prompt.push_str(label);
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned replies and records every request it sees.
    #[derive(Default)]
    pub struct ScriptedLlm {
        replies: Mutex<VecDeque<Result<Vec<String>, String>>>,
        pub requests: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedLlm {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: &str) -> Self {
            self.reply_parts(&[text])
        }

        pub fn reply_parts(self, parts: &[&str]) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(parts.iter().map(|p| p.to_string()).collect()));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<GenerateRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn generate(&self, request: &GenerateRequest) -> Result<Vec<String>, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(parts)) => Ok(parts),
                Some(Err(message)) => Err(LlmError::Malformed(message)),
                None => Err(LlmError::Malformed("no scripted reply left".to_string())),
            }
        }
    }
}
