use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl CommonConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeConfig {
    #[serde(flatten)]
    pub common: CommonConfig,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub translation: TranslationConfig,
    pub imagen: ImagenConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for vision and recipe prompts (e.g., gemini-1.5-pro)
    pub text_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    pub target_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagenConfig {
    pub project_id: String,
    pub location: String,
    pub model: String,
}

impl RecipeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(RecipeConfig {
            common,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("RECIPE_TEXT_MODEL", Some("gemini-1.5-pro"), is_prod)?,
            },
            translation: TranslationConfig {
                target_language: get_env("TRANSLATE_TARGET_LANGUAGE", Some("ja"), is_prod)?,
            },
            imagen: ImagenConfig {
                project_id: get_env("IMAGEN_PROJECT_ID", None, is_prod)?,
                location: get_env("IMAGEN_LOCATION", Some("us-central1"), is_prod)?,
                model: get_env("IMAGEN_MODEL", Some("imagen-3.0-generate-002"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
