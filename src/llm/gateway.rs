//! LLM gateway: a prompt goes in, generated text comes out.

use crate::config::LlmConfig;
use crate::error::{AtsError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Text generation backend used by the evaluator.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier shown in reports
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    status: Option<String>,
}

/// Gemini `generateContent` client. Built once per process and shared by
/// every request of an evaluation.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AtsError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl LlmGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Sending prompt of {} characters to {}", prompt.len(), self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AtsError::Gateway(api_error_message(status.as_u16(), &body)));
        }

        let text = extract_candidate_text(&body)?;
        debug!("Received reply of {} characters", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn api_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => match err.error.status {
            Some(code) => format!("status {} ({}): {}", status, code, err.error.message),
            None => format!("status {}: {}", status, err.error.message),
        },
        Err(_) if body.trim().is_empty() => format!("status {}", status),
        Err(_) => format!("status {}: {}", status, body.trim()),
    }
}

/// Join the text parts of the first candidate.
fn extract_candidate_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AtsError::Gateway(format!("unexpected response body: {}", e)))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(AtsError::Gateway(format!("prompt was not answered: {}", reason)));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(AtsError::Gateway(format!(
            "model returned no text (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}
