// Planner Agent: turns the user's query into an ordered list of tool calls

use crate::error::{PlanError, Result};
use crate::llm::LlmClient;
use crate::metrics;
use crate::models::{ChatMessage, Plan, PlanStep, RawPlan};
use crate::tools::{self, ToolKind};
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};

static JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("plan block pattern is valid")
});

pub struct PlannerAgent {
    llm: Arc<dyn LlmClient>,
    default_recipient: String,
}

impl PlannerAgent {
    pub fn new(llm: Arc<dyn LlmClient>, default_recipient: impl Into<String>) -> Self {
        Self {
            llm,
            default_recipient: default_recipient.into(),
        }
    }

    pub fn system_prompt(&self) -> Result<String> {
        let catalog = serde_json::to_string_pretty(&tools::catalog(&self.default_recipient))?;
        Ok(format!(
            r#"You are an AI assistant that can search for OTT series and send emails.
Available tools: {catalog}.
Analyze the user's query and determine which tools to use and in what order.
Format your response as a JSON object with the following structure:
{{
    "tools": [
        {{
            "name": "tool_name",
            "params": {{
                // function specific parameters
            }}
        }}
    ],
    "explanation": "Brief explanation of the plan"
}}"#
        ))
    }

    pub async fn plan(&self, query: &str, history: &[ChatMessage]) -> Result<Plan> {
        info!("Planner: Decomposing query: {}", query);

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt()?));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(query));

        let reply = self.llm.complete(&messages).await?;
        let raw = extract_plan(&reply)?;
        let plan = resolve(raw);

        info!(
            "Planner: {} step(s), {} skipped",
            plan.steps.len(),
            plan.skipped.len()
        );
        Ok(plan)
    }
}

/// Pulls the first fenced JSON object out of free-form model output.
pub fn extract_plan(text: &str) -> std::result::Result<RawPlan, PlanError> {
    let block = JSON_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or(PlanError::NoJsonBlock)?;
    Ok(serde_json::from_str(block.as_str())?)
}

/// Maps tool names onto the registry, dropping names it does not know.
pub fn resolve(raw: RawPlan) -> Plan {
    let mut plan = Plan {
        explanation: raw
            .explanation
            .and_then(|e| e.as_str().map(str::to_string)),
        ..Default::default()
    };

    for call in raw.tools {
        match call.name.as_str().and_then(ToolKind::from_name) {
            Some(tool) => plan.steps.push(PlanStep {
                tool,
                params: call.params,
            }),
            None => {
                warn!("Unknown tool requested: {}", call.name);
                metrics::TOOLS_SKIPPED.inc();
                plan.skipped.push(match call.name {
                    Value::String(name) => name,
                    other => other.to_string(),
                });
            }
        }
    }
    plan
}
