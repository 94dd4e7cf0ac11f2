//! Vertex AI Imagen `:predict` client.
//!
//! Requests exactly one square image in English generation mode and
//! returns its decoded bytes.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GeneratedImage, ImageProvider, ProviderError};

/// Imagen provider configuration.
#[derive(Debug, Clone)]
pub struct ImagenConfig {
    pub api_key: String,
    pub project_id: String,
    pub location: String,
    pub model: String,
}

pub struct VertexImagenProvider {
    config: ImagenConfig,
    client: Client,
}

impl VertexImagenProvider {
    pub fn new(config: ImagenConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn api_url(&self) -> String {
        format!(
            "https://{loc}-aiplatform.googleapis.com/v1/projects/{project}/locations/{loc}/publishers/google/models/{model}:predict",
            loc = self.config.location,
            project = self.config.project_id,
            model = self.config.model
        )
    }
}

#[async_trait]
impl ImageProvider for VertexImagenProvider {
    async fn generate(&self, prompt: &str) -> Result<Option<GeneratedImage>, ProviderError> {
        let request = PredictRequest {
            instances: vec![Instance {
                prompt: prompt.to_string(),
            }],
            parameters: Parameters {
                sample_count: 1,
                aspect_ratio: "1:1".to_string(),
                language: "en".to_string(),
            },
        };

        let url = self.api_url();

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Imagen API"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
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
                "Imagen API error {}: {}",
                status, error_text
            )));
        }

        let api_response: PredictResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let prediction = match api_response.predictions.into_iter().next() {
            Some(p) => p,
            None => return Ok(None),
        };

        let data = base64::engine::general_purpose::STANDARD
            .decode(&prediction.bytes_base64_encoded)
            .map_err(|e| {
                ProviderError::ApiError(format!("Image payload is not valid base64: {}", e))
            })?;

        Ok(Some(GeneratedImage {
            data,
            mime_type: prediction
                .mime_type
                .unwrap_or_else(|| "image/png".to_string()),
        }))
    }
}

// ============================================================================
// Imagen API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Instance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
    aspect_ratio: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
    #[serde(default)]
    mime_type: Option<String>,
}
