//! Ingredient detection endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppError;
use crate::models::{DetectIngredientsRequest, IngredientList};
use crate::services::extract;
use crate::services::providers::InlineImage;
use crate::startup::AppState;

use super::PrettyJson;

/// Instruction block sent alongside the image.
const DETECT_PROMPT: &str = r#"Identify the food ingredients present in this image. Return the result strictly as a JSON object in the following format:

{
    "ingredients": ["ingredient1", "ingredient2", "ingredient3"]
}

Do not include any extra text or explanations. Ensure the output is valid JSON."#;

pub async fn detect_ingredients(
    State(state): State<AppState>,
    Json(req): Json<DetectIngredientsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let image = req
        .image
        .ok_or_else(|| AppError::BadRequest("Image is required".to_string()))?;
    let mime_type = req
        .mime_type
        .ok_or_else(|| AppError::BadRequest("Mime_type is required".to_string()))?;

    let inline = InlineImage {
        mime_type,
        data: image,
    };
    let raw_text = state
        .text_provider
        .generate(DETECT_PROMPT, Some(&inline))
        .await?;
    tracing::info!(raw_text = %raw_text, "Vision model reply received");

    let parsed = extract::parse_ingredients(&raw_text)?;

    let mut ingredients = Vec::with_capacity(parsed.ingredients.len());
    for ingredient in &parsed.ingredients {
        ingredients.push(state.translator.translate(ingredient, Some("en")).await?);
    }

    Ok(PrettyJson(IngredientList { ingredients }))
}
