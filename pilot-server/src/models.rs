use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::ToolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    #[serde(other)]
    Other,
}

/// One conversation turn, as sent by the client and as fed to the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// API Request/Response models
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub email: Option<String>,
}

impl QueryRequest {
    /// Destination address supplied by the caller, if it is non-blank.
    pub fn destination(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub response: String,
}

// Planner output, exactly as the LLM wrote it
#[derive(Debug, Deserialize)]
pub struct RawPlan {
    #[serde(default)]
    pub tools: Vec<RawToolCall>,
    /// Free text; anything other than a string is ignored.
    #[serde(default)]
    pub explanation: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawToolCall {
    /// Kept untyped: a missing or non-string name is an unknown tool.
    #[serde(default)]
    pub name: Value,
    #[serde(default = "empty_params")]
    pub params: Value,
}

fn empty_params() -> Value {
    Value::Object(Default::default())
}

/// A plan after tool names have been resolved against the registry.
#[derive(Debug, Default)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    /// Names the LLM asked for that are not registered tools.
    pub skipped: Vec<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlanStep {
    pub tool: ToolKind,
    pub params: Value,
}

/// Output of one tool. Failures are reported as a status string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Segments(Vec<String>),
    Status(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub tool: ToolKind,
    pub result: ToolOutput,
}
