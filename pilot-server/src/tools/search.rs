use super::{ToolError, ToolKind};
use crate::llm::{GenerateRequest, LlmClient};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

impl SearchParams {
    pub fn from_value(params: Value) -> Result<Self, ToolError> {
        serde_json::from_value(params)
            .map_err(|e| ToolError::invalid_params(ToolKind::SearchOttSeries, e))
    }
}

/// Forwards the query verbatim to the LLM with web search enabled and
/// returns the text segments of its answer.
pub async fn search_ott_series(
    llm: &dyn LlmClient,
    params: &SearchParams,
) -> Result<Vec<String>, ToolError> {
    info!("Search: {}", params.query);
    llm.generate(&GenerateRequest::with_web_search(params.query.clone()))
        .await
        .map_err(|e| ToolError::Search(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fake::ScriptedLlm;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_forwards_query_with_web_search() {
        let llm = ScriptedLlm::new().reply_parts(&["1. Kota Factory", "2. Scam 1992"]);
        let params = SearchParams::from_value(json!({"query": "top indian series"})).unwrap();

        let segments = search_ott_series(&llm, &params).await.unwrap();

        assert_eq!(segments, vec!["1. Kota Factory", "2. Scam 1992"]);
        let requests = llm.requests();
        assert_eq!(requests[0].prompt, "top indian series");
        assert!(requests[0].web_search);
    }

    #[tokio::test]
    async fn test_search_failure_becomes_tool_error() {
        let llm = ScriptedLlm::new().fail("boom");
        let params = SearchParams {
            query: "anything".to_string(),
        };

        let err = search_ott_series(&llm, &params).await.unwrap_err();
        assert!(err.to_string().starts_with("Error searching OTT series:"));
    }

    #[test]
    fn test_missing_query_is_invalid() {
        let err = SearchParams::from_value(json!({})).unwrap_err();
        assert!(matches!(
            err,
            ToolError::InvalidParams {
                tool: ToolKind::SearchOttSeries,
                ..
            }
        ));
    }
}
