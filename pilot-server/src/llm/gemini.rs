use super::{GenerateRequest, LlmClient, LlmError};
use crate::config::Config;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout())
            .build()?;

        info!("Gemini client ready. Model: {}", config.gemini_model);
        Ok(Self {
            http,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body(request: &GenerateRequest) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }]
        });
        if request.web_search {
            body["tools"] = json!([{ "google_search": {} }]);
            body["generationConfig"] = json!({ "responseModalities": ["TEXT"] });
        }
        body
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<String>, LlmError> {
        debug!(
            "Calling Gemini (web_search={}, prompt_len={})",
            request.web_search,
            request.prompt.len()
        );

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateResponse = resp.json().await?;
        let candidate = payload
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Malformed("response has no candidates".to_string()))?;

        let Some(parts) = candidate.content.and_then(|c| c.parts) else {
            warn!(
                "Gemini candidate has no parts (finish_reason={:?})",
                candidate.finish_reason
            );
            return Ok(Vec::new());
        };

        // Non-text parts (grounding metadata, code) are only logged
        let mut texts = Vec::with_capacity(parts.len());
        for part in parts {
            match part.text {
                Some(text) => texts.push(text),
                None => debug!("Skipping non-text part in Gemini response"),
            }
        }
        Ok(texts)
    }
}
