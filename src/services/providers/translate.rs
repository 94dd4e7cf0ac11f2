//! Cloud Translation v2 client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ProviderError, Translator};

/// Translation API endpoint.
const TRANSLATE_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub api_key: String,
    pub target_language: String,
}

pub struct GoogleTranslator {
    config: TranslateConfig,
    client: Client,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: Option<&str>,
    ) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            q: text.to_string(),
            target: self.config.target_language.clone(),
            source: source_language.map(str::to_string),
            format: "text".to_string(),
        };

        let url = format!("{}?key={}", TRANSLATE_API_URL, self.config.api_key);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Translation API error {}: {}",
                status, error_text
            )));
        }

        let api_response: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        api_response
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(ProviderError::EmptyResponse)
    }
}

// ============================================================================
// Translation API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TranslateRequest {
    q: String,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    format: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}
