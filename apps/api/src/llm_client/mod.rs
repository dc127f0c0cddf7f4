/// LLM Client — the single point of entry for all Cohere API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Cohere API directly.
/// All LLM interactions go through the `TextGenerator` trait defined here.
///
/// Model: command-r-plus at temperature 0.7 (hardcoded — do not make configurable).
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::credential::ApiKey;

pub const COHERE_CHAT_URL: &str = "https://api.cohere.com/v1/chat";
/// The model used for all LLM calls.
pub const MODEL: &str = "command-r-plus";
pub const TEMPERATURE: f32 = 0.7;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key rejected (status {status})")]
    Unauthorized { status: u16 },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Generate-text capability. The analysis flow depends only on this trait,
/// so it can run against a fake in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, credential: &ApiKey) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub meta: Option<ChatMeta>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMeta {
    pub billed_units: Option<BilledUnits>,
}

#[derive(Debug, Deserialize)]
pub struct BilledUnits {
    pub input_tokens: Option<f64>,
    pub output_tokens: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CohereError {
    message: String,
}

/// Wraps the Cohere chat endpoint with retry on 429/5xx.
/// Holds no credential; the key is passed on every call.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_url: api_url.into(),
        })
    }

    /// Makes a raw chat call, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str, credential: &ApiKey) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            message: prompt,
            temperature: TEMPERATURE,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(credential.expose())
                .header("accept", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(if status.as_u16() == 429 {
                    LlmError::RateLimited {
                        retries: attempt + 1,
                    }
                } else {
                    LlmError::Api {
                        status: status.as_u16(),
                        message: body,
                    }
                });
                continue;
            }

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LlmError::Unauthorized {
                    status: status.as_u16(),
                });
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<CohereError>(&body)
                    .map(|e| e.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(units) = chat_response.meta.as_ref().and_then(|m| m.billed_units.as_ref()) {
                debug!(
                    "LLM call succeeded: input_tokens={:?}, output_tokens={:?}",
                    units.input_tokens, units.output_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, credential: &ApiKey) -> Result<String, LlmError> {
        let response = self.call(prompt, credential).await?;
        let text = response.text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}
