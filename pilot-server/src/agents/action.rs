// Action Agent: executes plan steps in order, threading search output into email

use crate::llm::LlmClient;
use crate::markup::markdown_to_html;
use crate::metrics;
use crate::models::{Plan, PlanStep, ToolOutput, ToolResult};
use crate::tools::email::{self, EmailParams, Mailer};
use crate::tools::search::{self, SearchParams};
use crate::tools::{ToolError, ToolKind};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ActionAgent {
    llm: Arc<dyn LlmClient>,
    mailer: Arc<dyn Mailer>,
    email_subject: String,
}

/// Outputs carried forward from earlier steps of the same plan.
#[derive(Debug, Default)]
struct Chain {
    search: Option<Vec<String>>,
}

impl ActionAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        mailer: Arc<dyn Mailer>,
        email_subject: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            mailer,
            email_subject: email_subject.into(),
        }
    }

    /// Runs every step sequentially. A failing step yields a status string and
    /// does not stop the steps after it.
    pub async fn execute_plan(&self, plan: &Plan, destination: Option<&str>) -> Vec<ToolResult> {
        let mut chain = Chain::default();
        let mut results = Vec::with_capacity(plan.steps.len());

        for step in &plan.steps {
            info!("Action: Executing {}", step.tool);
            metrics::TOOL_CALLS
                .with_label_values(&[step.tool.as_str()])
                .inc();

            let result = match self.execute(step, destination, &mut chain).await {
                Ok(output) => output,
                Err(e) => {
                    warn!("Action: {} failed: {}", step.tool, e);
                    ToolOutput::Status(e.to_string())
                }
            };
            results.push(ToolResult {
                tool: step.tool,
                result,
            });
        }
        results
    }

    async fn execute(
        &self,
        step: &PlanStep,
        destination: Option<&str>,
        chain: &mut Chain,
    ) -> Result<ToolOutput, ToolError> {
        match step.tool {
            ToolKind::SearchOttSeries => {
                let params = SearchParams::from_value(step.params.clone())?;
                let segments = search::search_ott_series(self.llm.as_ref(), &params).await?;
                chain.search = Some(segments.clone());
                Ok(ToolOutput::Segments(segments))
            }
            ToolKind::SendEmail => {
                let mut params = EmailParams::from_value(step.params.clone())?;
                if let Some(destination) = destination {
                    params.recipient = Some(destination.to_string());
                }
                if let Some(segments) = &chain.search {
                    params.body = Some(append_search_results(params.body.as_deref(), segments));
                }
                let status =
                    email::send_email(self.mailer.as_ref(), &self.email_subject, &params).await?;
                Ok(ToolOutput::Status(status))
            }
        }
    }
}

/// Caller body, then each search segment, `<br>`-separated and rendered to HTML.
fn append_search_results(body: Option<&str>, segments: &[String]) -> String {
    let combined = format!("{}<br>{}", body.unwrap_or_default(), segments.join("<br>"));
    markdown_to_html(&combined)
}
