//! Google Generative Language API client
//!
//! Calls `models/{model}:generateContent` with JSON output mode and the
//! flow's response schema. Images travel as `inlineData` parts.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::{FlowError, GenerateRequest, GenerativeModel};
use crate::config::ModelConfig;
use crate::{Result, WanderLensError};

pub struct GeminiModel {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiModel {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("WanderLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WanderLensError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from config; the key must be configured or present in the environment
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            WanderLensError::config(
                "No model API key found. Set model.api_key or GEMINI_API_KEY.",
            )
        })?;

        Self::new(
            &config.base_url,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_seconds.into()),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Media {
        #[serde(rename = "inlineData")]
        inline_data: Blob<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

fn build_body<'a>(request: &'a GenerateRequest) -> GenerateContentRequest<'a> {
    let mut parts = vec![Part::Text {
        text: &request.prompt,
    }];
    parts.extend(request.media.iter().map(|media| Part::Media {
        inline_data: Blob {
            mime_type: &media.mime_type,
            data: &media.data,
        },
    }));

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts,
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.output_schema,
        },
    }
}

/// Concatenated text of the first candidate, parsed as JSON
fn extract_json(response: GenerateContentResponse) -> std::result::Result<Value, FlowError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let text = strip_code_fence(text.trim());
    if text.is_empty() {
        return Err(FlowError::invalid_response("no valid response"));
    }

    serde_json::from_str(text)
        .map_err(|e| FlowError::invalid_response(format!("no valid response: {e}")))
}

// Some models wrap JSON mode output in a markdown fence anyway.
fn strip_code_fence(text: &str) -> &str {
    text.strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .and_then(|t| t.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(text)
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    #[instrument(skip(self, request), fields(flow = request.flow, model = %self.model))]
    async fn generate(&self, request: GenerateRequest) -> std::result::Result<Value, FlowError> {
        let start_time = Instant::now();
        let body = build_body(&request);

        debug!(
            "Sending prompt ({} chars, {} media parts)",
            request.prompt.len(),
            request.media.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Model request failed: {}", e);
                FlowError::network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!("Model API returned {}: {}", status, error_body);
            return Err(FlowError::network(format!(
                "model API returned {status}"
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Failed to parse model response envelope: {}", e);
            FlowError::invalid_response(format!("no valid response: {e}"))
        })?;

        let value = extract_json(parsed)?;

        info!(
            "Model answered in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(value)
    }
}
