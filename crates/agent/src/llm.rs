use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use stylist_core::config::GenerationConfig;
use thiserror::Error;

/// Chat-tuned models echo the prompt; the reply starts after the last marker.
pub const ASSISTANT_MARKER: &str = "Assistant:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedText(pub String);

impl GeneratedText {
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation is disabled")]
    Disabled,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response contained no generated text")]
    Empty,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedText, GenerationError>;
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_length: u32,
}

/// Client for a hosted inference endpoint answering
/// `[{"generated_text": "..."}]`.
pub struct HostedTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
    max_length: u32,
}

impl HostedTextGenerator {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            max_length: config.max_length,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for HostedTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedText, GenerationError> {
        let body = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters { max_length: self.max_length },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        let payload = response.text().await?;
        extract_generated_text(&payload)
    }
}

/// Stand-in used when generation is switched off in config.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GeneratedText, GenerationError> {
        Err(GenerationError::Disabled)
    }
}

/// Pulls `generated_text` out of the first array element, keeps what follows
/// the last [`ASSISTANT_MARKER`] and trims it. Blank output is an error.
pub fn extract_generated_text(payload: &str) -> Result<GeneratedText, GenerationError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|error| GenerationError::Malformed(format!("invalid JSON: {error}")))?;

    let first = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Malformed("empty result array".to_string()))?,
        other => {
            return Err(GenerationError::Malformed(format!(
                "expected an array, got {}",
                json_kind(&other)
            )))
        }
    };

    let text = first
        .get("generated_text")
        .and_then(Value::as_str)
        .ok_or_else(|| GenerationError::Malformed("missing `generated_text` string".to_string()))?;

    let reply = match text.rfind(ASSISTANT_MARKER) {
        Some(index) => &text[index + ASSISTANT_MARKER.len()..],
        None => text,
    }
    .trim();

    if reply.is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(GeneratedText(reply.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
