//! Per-request pipeline: plan, dispatch, summarize.

use crate::agents::{ActionAgent, PlannerAgent, SummarizerAgent};
use crate::config::Config;
use crate::error::Result;
use crate::llm::{GeminiClient, LlmClient};
use crate::models::QueryRequest;
use crate::tools::{Mailer, SmtpMailer};
use std::sync::Arc;
use tracing::info;

/// Holds no per-request state; one instance serves all requests.
pub struct Orchestrator {
    planner: PlannerAgent,
    actions: ActionAgent,
    summarizer: SummarizerAgent,
}

impl Orchestrator {
    /// Builds the Gemini client and SMTP mailer from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let llm = Arc::new(GeminiClient::new(config)?);
        let mailer = Arc::new(SmtpMailer::new(config)?);
        Ok(Self::with_clients(llm, mailer, config))
    }

    pub fn with_clients(llm: Arc<dyn LlmClient>, mailer: Arc<dyn Mailer>, config: &Config) -> Self {
        Self {
            planner: PlannerAgent::new(llm.clone(), config.sender_email.clone()),
            actions: ActionAgent::new(llm.clone(), mailer, config.email_subject.clone()),
            summarizer: SummarizerAgent::new(llm),
        }
    }

    pub async fn process(&self, request: &QueryRequest) -> Result<String> {
        let plan = self.planner.plan(&request.query, &request.history).await?;
        if let Some(explanation) = &plan.explanation {
            info!("Plan: {}", explanation);
        }

        let results = self
            .actions
            .execute_plan(&plan, request.destination())
            .await;

        self.summarizer.summarize(&request.history, &results).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::error::{ApiError, PlanError};
    use crate::llm::fake::ScriptedLlm;
    use crate::tools::email::fake::RecordingMailer;

    fn request(query: &str) -> QueryRequest {
        QueryRequest {
            query: query.to_string(),
            history: vec![],
            email: None,
        }
    }

    #[tokio::test]
    async fn test_empty_plan_returns_narration_of_nothing() {
        let llm = Arc::new(
            ScriptedLlm::new()
                .reply("```json\n{\"tools\": [], \"explanation\": \"nothing to do\"}\n```")
                .reply("I did not need any tools."),
        );
        let orchestrator =
            Orchestrator::with_clients(llm.clone(), Arc::new(RecordingMailer::default()), &test_config());

        let response = orchestrator.process(&request("hello")).await.unwrap();

        assert_eq!(response, "I did not need any tools.");
        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1]
            .prompt
            .contains("Here are the results from executing the tools: []."));
    }

    #[tokio::test]
    async fn test_missing_plan_block_aborts() {
        let llm = Arc::new(ScriptedLlm::new().reply("I think you should search."));
        let orchestrator =
            Orchestrator::with_clients(llm.clone(), Arc::new(RecordingMailer::default()), &test_config());

        let err = orchestrator.process(&request("hello")).await.unwrap_err();

        assert!(matches!(err, ApiError::Plan(PlanError::NoJsonBlock)));
        assert_eq!(llm.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_left_out_of_results() {
        let llm = Arc::new(
            ScriptedLlm::new()
                .reply("```json\n{\"tools\": [{\"name\": \"book_flight\", \"params\": {}}]}\n```")
                .reply("Done."),
        );
        let orchestrator =
            Orchestrator::with_clients(llm.clone(), Arc::new(RecordingMailer::default()), &test_config());

        orchestrator.process(&request("fly me")).await.unwrap();

        let summary_prompt = &llm.requests()[1].prompt;
        assert!(summary_prompt.contains("tools: []."));
        assert!(!summary_prompt.contains("book_flight"));
    }

    #[tokio::test]
    async fn test_search_and_email_end_to_end() {
        let plan = r#"Here is my plan:
```json
{
  "tools": [
    {"name": "search_ott_series", "params": {"query": "Find top series"}},
    {"name": "send_email", "params": {"recipient": "pilot@example.com", "subject": "Series", "body": "Top series this week:"}}
  ],
  "explanation": "Search, then email the list"
}
```"#;
        let llm = Arc::new(
            ScriptedLlm::new()
                .reply(plan)
                .reply_parts(&["1. The Family Man", "2. Paatal Lok"])
                .reply("I found **2 series** and emailed them to you."),
        );
        let mailer = Arc::new(RecordingMailer::default());
        let orchestrator = Orchestrator::with_clients(llm.clone(), mailer.clone(), &test_config());

        let mut req = request("Find top series and email them");
        req.email = Some("viewer@example.com".to_string());
        let response = orchestrator.process(&req).await.unwrap();

        assert!(!response.is_empty());
        assert!(!response.contains("\"tools\""));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "viewer@example.com");
        assert!(sent[0].html_body.contains("Top series this week:"));
        assert!(sent[0].html_body.contains("1. The Family Man"));

        let requests = llm.requests();
        assert!(requests[1].web_search);
        assert_eq!(requests[1].prompt, "Find top series");
        assert!(requests[2].prompt.contains("Email sent successfully"));
    }
}
