//! Bhulekh Translate - translation collaborator
//!
//! Best-effort client for the public Google translation endpoint. The
//! service being unreachable is an expected condition, not an error:
//! every failure maps to `Translation::Unavailable`, and record assembly
//! substitutes a transliteration of the same phrase.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use bhulekh_core::{config::TranslationConfig, Result, RorError, Translation, Translator};

// ============================================================================
// Google endpoint client
// ============================================================================

/// Client for the `translate_a/single` endpoint
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslator {
    /// Create a client with the default Odia-to-English settings
    pub fn new() -> Result<Self> {
        Self::from_config(&TranslationConfig::default())
    }

    /// Create a client from configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RorError::Translation(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
        })
    }

    /// Pull the translated segments out of the endpoint's response.
    ///
    /// The body is a bare JSON array of arrays; the first element holds
    /// `[translated, source, ...]` segment pairs.
    fn parse_response(body: &serde_json::Value) -> Option<String> {
        let segments = body.get(0)?.as_array()?;

        let mut out = String::new();
        for segment in segments {
            if let Some(text) = segment.get(0).and_then(|v| v.as_str()) {
                out.push_str(text);
            }
        }

        let out = out.trim().to_string();
        (!out.is_empty()).then_some(out)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Translation {
        let request = self.client.get(&self.endpoint).query(&[
            ("client", "gtx"),
            ("sl", self.source_lang.as_str()),
            ("tl", self.target_lang.as_str()),
            ("dt", "t"),
            ("q", text.trim()),
        ]);

        let response = match request.send().await.and_then(|r| r.error_for_status()) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "translation request failed");
                return Translation::Unavailable;
            }
        };

        let body = match response.json::<serde_json::Value>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "translation response was not JSON");
                return Translation::Unavailable;
            }
        };

        match Self::parse_response(&body) {
            Some(translated) => Translation::Translated(translated),
            None => Translation::Unavailable,
        }
    }

    fn name(&self) -> &str {
        "google-translate"
    }
}

// ============================================================================
// Disabled translation
// ============================================================================

/// Offline mode: always reports the service unavailable, so every
/// land-type phrase falls back to transliteration.
pub struct NoTranslation;

#[async_trait]
impl Translator for NoTranslation {
    async fn translate(&self, _text: &str) -> Translation {
        Translation::Unavailable
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

// ============================================================================
// Tests
// ============================================================================
