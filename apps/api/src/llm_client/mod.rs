/// Guidance Client: the single point of entry for text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the model provider directly.
/// Workflows depend on the `GuidanceClient` trait; `HuggingFaceClient` is the
/// production backend and is constructed once in `main`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Generation knobs carried alongside every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    /// `false` means greedy decoding; `temperature` is then not sent.
    pub sampling: bool,
    pub temperature: f32,
}

impl GenerationParams {
    pub const fn greedy(max_new_tokens: u32) -> Self {
        Self {
            max_new_tokens,
            sampling: false,
            temperature: 1.0,
        }
    }

    pub const fn sampled(max_new_tokens: u32, temperature: f32) -> Self {
        Self {
            max_new_tokens,
            sampling: true,
            temperature,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model returned empty content")]
    EmptyContent,
}

/// Black-box text generation. Implementations must be cheap to share across requests.
#[async_trait]
pub trait GuidanceClient: Send + Sync {
    /// Returns the generated text, trimmed of surrounding whitespace.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;

    /// Model identifier, for logging and the health endpoint.
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    do_sample: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl From<&GenerationParams> for InferenceParameters {
    fn from(params: &GenerationParams) -> Self {
        Self {
            max_new_tokens: params.max_new_tokens,
            do_sample: params.sampling,
            temperature: params.sampling.then_some(params.temperature),
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

/// Hugging Face Inference API backend (text2text / text-generation pipelines).
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
    model: String,
    api_token: String,
    retry_delay: Duration,
}

impl HuggingFaceClient {
    pub fn new(
        api_base: &str,
        model: String,
        api_token: String,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/models/{}", api_base.trim_end_matches('/'), model),
            model,
            api_token,
            retry_delay: RETRY_BASE_DELAY,
        })
    }

    #[cfg(test)]
    fn with_backoff(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}

#[async_trait]
impl GuidanceClient for HuggingFaceClient {
    /// Retries on 429 (rate limit) and 5xx (model loading) with exponential backoff.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: params.into(),
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut last_error: Option<GenerationError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = self.retry_delay * (1 << (attempt - 1));
                warn!(
                    "Generation attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_token)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) if e.is_timeout() => return Err(GenerationError::Http(e)),
                Err(e) => {
                    last_error = Some(GenerationError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Inference API returned {}: {}", status, body);
                last_error = Some(GenerationError::Api {
                    status: status.as_u16(),
                    message: provider_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message: provider_message(body),
                });
            }

            let generated: Vec<GeneratedText> = response.json().await?;
            let text = extract_text(generated)?;

            debug!(
                "Generation succeeded: model={}, max_new_tokens={}, chars={}",
                self.model,
                params.max_new_tokens,
                text.len()
            );

            return Ok(text);
        }

        Err(last_error.unwrap_or(GenerationError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Prefers the provider's `{"error": "..."}` message over the raw body.
fn provider_message(body: String) -> String {
    serde_json::from_str::<InferenceError>(&body)
        .map(|e| e.error)
        .unwrap_or(body)
}

/// Takes the first generation, trimmed. Blank output counts as a failure.
fn extract_text(generated: Vec<GeneratedText>) -> Result<String, GenerationError> {
    generated
        .into_iter()
        .next()
        .map(|g| g.generated_text.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(GenerationError::EmptyContent)
}

/// Runs one generation under `timeout`, mapping expiry to `GenerationError::Timeout`.
pub async fn generate_with_timeout(
    client: &dyn GuidanceClient,
    prompt: &str,
    params: &GenerationParams,
    timeout: Duration,
) -> Result<String, GenerationError> {
    match tokio::time::timeout(timeout, client.generate(prompt, params)).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}
