//! External AI collaborators behind trait seams.
//!
//! Each upstream service (vision/text model, translation, image
//! generation) is reached through a trait so handlers can be exercised
//! against mocks.

pub mod gemini;
pub mod imagen;
pub mod mock;
pub mod translate;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Empty response from upstream service")]
    EmptyResponse,
}

/// Inline image payload, forwarded to the vision model unmodified.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64-encoded bytes, exactly as received from the client.
    pub data: String,
}

/// One generated image.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Text generation, optionally grounded on an inline image.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send a prompt and return the raw model text.
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, ProviderError>;
}

/// Single-string translation into the configured target language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: Option<&str>,
    ) -> Result<String, ProviderError>;
}

/// Text-to-image generation.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one image; `None` when the upstream service produces no
    /// prediction.
    async fn generate(&self, prompt: &str) -> Result<Option<GeneratedImage>, ProviderError>;
}
