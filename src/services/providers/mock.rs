//! Mock provider implementations for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GeneratedImage, ImageProvider, InlineImage, ProviderError, TextProvider, Translator};

/// Mock text provider replying with a canned string.
pub struct MockTextProvider {
    response: Option<String>,
}

impl MockTextProvider {
    pub fn replying(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _image: Option<&InlineImage>,
    ) -> Result<String, ProviderError> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::ApiError(
                "mock text provider failure".to_string(),
            )),
        }
    }
}

/// Mock translator with a fixed lookup table; unknown inputs are echoed
/// back with a `ja:` prefix so ordering stays observable.
pub struct MockTranslator {
    entries: HashMap<String, String>,
    fail: bool,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fail: false,
        }
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail: true,
        }
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: Option<&str>,
    ) -> Result<String, ProviderError> {
        if self.fail {
            return Err(ProviderError::ApiError(
                "translation backend unavailable".to_string(),
            ));
        }

        Ok(self
            .entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("ja:{}", text)))
    }
}

/// Mock image provider; records the prompts it was asked to render.
pub struct MockImageProvider {
    response: Option<Vec<u8>>,
    fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockImageProvider {
    pub fn returning(data: Vec<u8>) -> Self {
        Self {
            response: Some(data),
            fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self {
            response: None,
            fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            fail: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(&self, prompt: &str) -> Result<Option<GeneratedImage>, ProviderError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());

        if self.fail {
            return Err(ProviderError::ApiError(
                "mock image provider failure".to_string(),
            ));
        }

        Ok(self.response.clone().map(|data| GeneratedImage {
            data,
            mime_type: "image/png".to_string(),
        }))
    }
}
