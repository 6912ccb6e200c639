//! The fixed tool registry.
//!
//! Tools form a closed set: the planner resolves LLM-chosen names into
//! [`ToolKind`] once, and dispatch matches on it exhaustively.

pub mod email;
pub mod search;

pub use email::{EmailParams, Mailer, OutgoingEmail, SmtpMailer};
pub use search::SearchParams;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Web-search-backed lookup of streaming content.
    SearchOttSeries,
    /// Send the results by email.
    SendEmail,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::SearchOttSeries, ToolKind::SendEmail];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::SearchOttSeries => "search_ott_series",
            ToolKind::SendEmail => "send_email",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::SearchOttSeries => "Search for trending content on ott platforms",
            ToolKind::SendEmail => {
                "takes the result of tool search_ott_series and Send email with the result"
            }
        }
    }

    /// Parameter shape advertised to the planner.
    pub fn params_hint(self, default_recipient: &str) -> Value {
        match self {
            ToolKind::SearchOttSeries => json!({ "query": "string" }),
            ToolKind::SendEmail => json!({
                "recipient": default_recipient,
                "subject": "string",
                "body": "string"
            }),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool catalog as embedded in the planner prompt.
pub fn catalog(default_recipient: &str) -> Value {
    let entries = ToolKind::ALL
        .into_iter()
        .map(|kind| {
            (
                kind.as_str().to_string(),
                json!({
                    "description": kind.description(),
                    "params": kind.params_hint(default_recipient),
                }),
            )
        })
        .collect::<serde_json::Map<_, _>>();
    Value::Object(entries)
}

/// Failure of a single tool. Rendered into the result list, never raised.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Missing email or content")]
    MissingEmailFields,

    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParams { tool: ToolKind, reason: String },

    #[error("Error searching OTT series: {0}")]
    Search(String),

    #[error("Error sending email: {0}")]
    Email(String),
}

impl ToolError {
    pub fn invalid_params(tool: ToolKind, err: serde_json::Error) -> Self {
        ToolError::InvalidParams {
            tool,
            reason: err.to_string(),
        }
    }
}
