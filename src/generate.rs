//! Generative model client.
//!
//! Defines the [`Generator`] trait (`generate(prompt) -> text`) and the
//! concrete implementations:
//! - **[`DisabledGenerator`]**: returns errors; used when generation is not configured.
//! - **[`GeminiGenerator`]**: calls the Google Generative Language API with retry and backoff.
//!
//! A generator is always created from configuration and passed explicitly to
//! the code that needs it. Nothing here reads a process-wide model handle.
//!
//! # Retry Strategy
//!
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::GenerationConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// A text generation backend.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the model identifier (e.g. `"gemini-2.0-flash"`).
    fn model_name(&self) -> &str;

    /// Send `prompt` to the model and return its text response.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ============ Disabled Generator ============

/// A generator that always fails.
///
/// Used when `generation.provider = "disabled"` in the configuration.
pub struct DisabledGenerator;

#[async_trait]
impl Generator for DisabledGenerator {
    fn model_name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        bail!("Generation provider is disabled; set [generation].provider in the config file")
    }
}

// ============ Gemini Generator ============

/// Generator backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    model: String,
    api_key: String,
    max_retries: u32,
    client: reqwest::Client,
}

impl GeminiGenerator {
    /// Create a Gemini generator from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not set or does not look like
    /// a Google API key, or if the HTTP client cannot be built.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let api_key = std::env::var(GEMINI_API_KEY_VAR)
            .map_err(|_| anyhow::anyhow!("{} environment variable not set", GEMINI_API_KEY_VAR))?;

        if !is_valid_api_key_format(&api_key) {
            bail!(
                "{} does not look like a Google API key (expected 'AIza...')",
                GEMINI_API_KEY_VAR
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            max_retries: config.max_retries,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tracing::debug!(attempt, ?delay, "retrying generation request");
                tokio::time::sleep(delay).await;
            }

            let resp = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response.json().await?;
                        return parse_gemini_response(&json);
                    }

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        tracing::warn!(%status, "generation request failed, will retry");
                        last_err = Some(anyhow::anyhow!(
                            "Gemini API error {}: {}",
                            status,
                            body_text
                        ));
                        continue;
                    }

                    // Client error (not 429) — don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    bail!("Gemini API error {}: {}", status, body_text);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "generation request failed, will retry");
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Generation failed after retries")))
    }
}

/// Extract the text of the first candidate from a `generateContent` response.
///
/// Multiple text parts are concatenated in order.
pub fn parse_gemini_response(json: &serde_json::Value) -> Result<String> {
    let parts = json
        .pointer("/candidates/0/content/parts")
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            let reason = json
                .pointer("/promptFeedback/blockReason")
                .and_then(|r| r.as_str())
                .unwrap_or("missing candidates");
            anyhow::anyhow!("Invalid Gemini response: {}", reason)
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        bail!("Invalid Gemini response: candidate has no text");
    }
    Ok(text)
}

/// Basic shape check for a Google API key.
pub fn is_valid_api_key_format(api_key: &str) -> bool {
    api_key.len() > 20 && api_key.starts_with("AIza")
}

/// Create the [`Generator`] selected by configuration.
///
/// | Config Value | Generator |
/// |-------------|----------|
/// | `"disabled"` | [`DisabledGenerator`] |
/// | `"gemini"` | [`GeminiGenerator`] |
pub fn create_generator(config: &GenerationConfig) -> Result<Box<dyn Generator>> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledGenerator)),
        "gemini" => Ok(Box::new(GeminiGenerator::new(config)?)),
        other => bail!("Unknown generation provider: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_format() {
        assert!(is_valid_api_key_format("AIzaSyA1234567890abcdefghij"));
        assert!(!is_valid_api_key_format("AIza-short"));
        assert!(!is_valid_api_key_format("sk-1234567890abcdefghijklmnop"));
        assert!(!is_valid_api_key_format(""));
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Q1: " }, { "text": "Why?" }] }
            }]
        });
        assert_eq!(parse_gemini_response(&json).unwrap(), "Q1: Why?");
    }

    #[test]
    fn test_parse_response_reports_block_reason() {
        let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = parse_gemini_response(&json).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_parse_response_without_text() {
        let json = serde_json::json!({ "candidates": [{ "content": { "parts": [] } }] });
        assert!(parse_gemini_response(&json).is_err());
    }

    #[tokio::test]
    async fn test_disabled_generator_errors() {
        let generator = create_generator(&GenerationConfig::default()).unwrap();
        assert_eq!(generator.model_name(), "disabled");
        assert!(generator.generate("anything").await.is_err());
    }
}
