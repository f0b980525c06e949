use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::client::RecommendationProvider;
use crate::error::{DenError, DenResult};
use crate::models::MovieRecord;

/// HTTP client for the Den proxy server
///
/// The proxy exposes two routes: `GET /api/config` reporting readiness and
/// `POST /api/generate` forwarding a prompt to the model vendor, answering
/// `{"text": ...}` on success or `{"error": ...}` with a non-success status.
#[derive(Clone)]
pub struct DenProxyClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// Successful completion body from the proxy
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

/// Error body the proxy attaches to non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Readiness body from the config route
#[derive(Debug, Deserialize)]
struct ConfigResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    model: Option<String>,
}

impl DenProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> DenResult<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends a prompt through the proxy and returns the raw completion text
    async fn generate(&self, prompt: &str) -> DenResult<String> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(DenError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        if body.text.trim().is_empty() {
            return Err(DenError::Parse("empty completion from proxy".to_string()));
        }

        tracing::debug!(chars = body.text.len(), "Completion received from proxy");
        Ok(body.text)
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for DenProxyClient {
    async fn check_ready(&self) -> DenResult<()> {
        let url = format!("{}/api/config", self.base_url);
        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(DenError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let config: ConfigResponse = response.json().await?;
        if !config.ok {
            return Err(DenError::Provider {
                status: status.as_u16(),
                message: "proxy reports no model API key configured".to_string(),
            });
        }

        tracing::info!(model = config.model.as_deref().unwrap_or("unknown"), "Den proxy ready");
        Ok(())
    }

    async fn request_recommendation(&self, mood: &str) -> DenResult<MovieRecord> {
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(DenError::Input(
                "Tell me a mood first, even a vague one.".to_string(),
            ));
        }

        let prompt = format!(
            "Recommend ONE movie based on: \"{}\". Return a single JSON object with keys \
             title, year, rating, desc, director, cast, runtime, boxOffice, streamingHint. \
             No markdown, no commentary.",
            mood
        );

        let text = self.generate(&prompt).await?;
        let movie = parse_recommendation(&text)?;

        tracing::info!(title = %movie.title, year = %movie.year, "Recommendation received");
        Ok(movie)
    }

    async fn request_hype(&self, title: &str, year: &str) -> DenResult<String> {
        let prompt = format!(
            "Give me a short, spoiler-free hype pitch for the movie \"{}\" ({}). \
             Two or three sentences, plain text.",
            title, year
        );

        let pitch = self.generate(&prompt).await?;
        Ok(pitch.trim().to_string())
    }
}

/// Extracts and parses the JSON object embedded in free-form model output
///
/// The generator is not guaranteed to emit bare JSON: completions routinely
/// arrive wrapped in prose or code fences. The contract is deliberately
/// lenient: take the substring from the first `{` to the last `}` and parse
/// only that. The raw payload is logged at debug on failure, never surfaced.
pub fn parse_recommendation(text: &str) -> DenResult<MovieRecord> {
    let embedded = extract_embedded_json(text).ok_or_else(|| {
        tracing::debug!(response = %text, "No JSON object in model output");
        DenError::Parse("no JSON object in model output".to_string())
    })?;

    serde_json::from_str(embedded).map_err(|e| {
        tracing::debug!(response = %text, error = %e, "Model output failed to parse");
        DenError::Parse(e.to_string())
    })
}

fn extract_embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
