use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::consts::{DEFAULT_AI_TIMEOUT_SECS, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL};

use super::Oracle;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        }
    }
}

/// An oracle backed by Google's Gemini API.
pub struct GeminiOracle {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiOracle {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Pull `candidates[0].content.parts[0].text` out of a response body.
    /// Any missing link in that chain yields `None`.
    fn parse_response(body: &str) -> Result<Option<String>> {
        let response: ApiResponse = serde_json::from_str(body)
            .with_context(|| format!("failed to parse Gemini response: {}", body))?;

        Ok(response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text))
    }
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn answer(&self, prompt: &str) -> Result<Option<String>> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            bail!("no Gemini API key configured. Set GEMINI_API_KEY.");
        };

        let body = ApiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        // Header, not query string: reqwest errors echo the URL.
        let resp = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("failed to read Gemini response")?;
        if !status.is_success() {
            bail!("Gemini API error ({}): {}", status, text);
        }

        debug!(model = %self.config.model, bytes = text.len(), "Gemini replied");
        Self::parse_response(&text)
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
