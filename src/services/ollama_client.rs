use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::generator::TextGenerator;
use crate::error::{LagError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MODEL: &str = "gemma:2b";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Non-streaming client for a local Ollama server
#[derive(Clone, Debug)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    timeout: Duration,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `LAGLESS_OLLAMA_URL` (or `OLLAMA_HOST`), `LAGLESS_MODEL` and `LAGLESS_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut client = Self::new();

        if let Ok(base_url) =
            std::env::var("LAGLESS_OLLAMA_URL").or_else(|_| std::env::var("OLLAMA_HOST"))
        {
            client = client.with_base_url(base_url);
        }

        if let Ok(model) = std::env::var("LAGLESS_MODEL") {
            client = client.with_model(model);
        }

        if let Ok(secs) = std::env::var("LAGLESS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                LagError::Config(format!(
                    "LAGLESS_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))
            })?;
            client = client.with_timeout(Duration::from_secs(secs));
        }

        Ok(client)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Accepts a full URL or a bare `host:port` as Ollama itself does.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{}", base_url)
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one prompt and return the generated text. No retries.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                LagError::Unavailable(format!("AI not available: failed to build HTTP client: {err}"))
            })?;

        let request_url = build_generate_url(&self.base_url);
        debug!(url = %request_url, model = %self.model, "sending generate request");

        let response = client
            .post(&request_url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        let status = response.status();
        let response_text = response.text().await.map_err(|err| {
            if err.is_timeout() {
                LagError::Timeout(format!("Timed out reading response: {err}"))
            } else {
                LagError::Generation(format!("Failed to read response: {err}"))
            }
        })?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<GenerateResponse>(&response_text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or(response_text);
            return Err(LagError::Generation(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let mut deserializer = serde_json::Deserializer::from_str(&response_text);
        let body: GenerateResponse =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
                debug!(path = %err.path(), "undecodable generate response");
                LagError::Serialization(err.into_inner())
            })?;

        if let Some(message) = body.error {
            return Err(LagError::Generation(format!("API error: {}", message)));
        }

        Ok(body.response.unwrap_or_default())
    }

    fn map_send_error(&self, err: reqwest::Error) -> LagError {
        if err.is_connect() {
            LagError::Unavailable(format!(
                "AI not available. Is Ollama installed and running at {}? ({err})",
                self.base_url
            ))
        } else if err.is_timeout() {
            LagError::Timeout(format!("Generate request timed out: {err}"))
        } else {
            LagError::Generation(format!("HTTP request failed: {err}"))
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.complete(prompt).await
    }
}

fn build_generate_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/api/generate") {
        trimmed.to_string()
    } else {
        format!("{}/api/generate", trimmed)
    }
}
