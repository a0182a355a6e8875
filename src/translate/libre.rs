//! LibreTranslate-compatible HTTP translation client.

use crate::config::Config;
use crate::error::{Result, SubkitError};
use crate::translate::retry::{ResponseClass, RetryEvent, RetryPolicy, RetryState};
use crate::translate::Translator;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Translator backed by a LibreTranslate `/translate` endpoint.
pub struct LibreTranslateClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    policy: RetryPolicy,
}

impl LibreTranslateClient {
    /// Create a client for `endpoint` with the default request timeout and
    /// retry policy.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(30))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
            policy: RetryPolicy::default(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::with_timeout(config.translate_url.clone(), config.request_timeout())?
            .with_retry_policy(RetryPolicy::new(
                config.retry_attempts,
                config.retry_delay(),
            ));
        Ok(match config.api_key.clone() {
            Some(key) => client.with_api_key(key),
            None => client,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// One request, classified for the retry machine.
    async fn attempt(
        &self,
        request: &TranslateRequest<'_>,
    ) -> std::result::Result<String, (ResponseClass, String)> {
        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err((ResponseClass::Timeout, format!("Request timed out: {e}")));
            }
            Err(e) => {
                return Err((
                    ResponseClass::TransientError,
                    format!("Translation request failed: {e}"),
                ));
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err((ResponseClass::RateLimited, "Rate limited (429)".to_string()));
        }

        let body = response.text().await.map_err(|e| {
            let class = if e.is_timeout() {
                ResponseClass::Timeout
            } else {
                ResponseClass::TransientError
            };
            (class, format!("Failed to read response: {e}"))
        })?;

        if status != StatusCode::OK {
            return Err((
                ResponseClass::TransientError,
                format!("Translation API error ({status}): {body}"),
            ));
        }

        let parsed: TranslateResponse = serde_json::from_str(&body).map_err(|e| {
            (
                ResponseClass::TransientError,
                format!("Invalid response JSON: {e}"),
            )
        })?;

        parsed.translated_text.ok_or_else(|| {
            (
                ResponseClass::Malformed,
                format!("Response has no translatedText: {body}"),
            )
        })
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let mut state = RetryState::Idle;
        let mut translated = None;
        let mut last_error = String::new();

        loop {
            state = match state {
                RetryState::Idle => self.policy.transition(state, RetryEvent::Start),
                RetryState::Attempting { attempt } => match self.attempt(&request).await {
                    Ok(text) => {
                        translated = Some(text);
                        self.policy
                            .transition(state, RetryEvent::Response(ResponseClass::Ok))
                    }
                    Err((class, detail)) => {
                        debug!("Translation attempt {} failed: {}", attempt, detail);
                        last_error = detail;
                        self.policy.transition(state, RetryEvent::Response(class))
                    }
                },
                RetryState::BackingOff { delay, .. } => {
                    tokio::time::sleep(delay).await;
                    self.policy.transition(state, RetryEvent::BackoffElapsed)
                }
                RetryState::Succeeded => {
                    return translated.ok_or_else(|| {
                        SubkitError::TranslationService("Empty translation".to_string())
                    });
                }
                RetryState::Exhausted {
                    last: ResponseClass::RateLimited,
                } => return Err(SubkitError::RateLimited(self.policy.max_attempts)),
                RetryState::Exhausted { .. } => {
                    return Err(SubkitError::TranslationService(last_error));
                }
            };
        }
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}
