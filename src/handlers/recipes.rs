//! Recipe generation endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use base64::Engine;

use crate::error::AppError;
use crate::models::{GenerateRecipeRequest, RecipeResponse};
use crate::services::extract;
use crate::startup::AppState;

use super::PrettyJson;

pub async fn generate_recipe(
    State(state): State<AppState>,
    Json(req): Json<GenerateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (ingredients, feeling) = match (req.ingredients, req.feeling) {
        (Some(ingredients), Some(feeling)) => (ingredients, feeling),
        _ => {
            return Err(AppError::BadRequest(
                "Missing required fields: 'ingredients' and 'feeling'".to_string(),
            ))
        }
    };

    let prompt = build_prompt(&ingredients, &feeling);
    let raw_text = state.text_provider.generate(&prompt, None).await?;
    tracing::debug!(raw_text = %raw_text, "Recipe model reply received");

    let draft = extract::parse_recipe(&raw_text)?;

    // The illustration prompt uses the untranslated title; generation
    // runs in English mode.
    let image = state
        .image_provider
        .generate(&format!(
            "a high-quality food photograph of {}, delicious and well-plated",
            draft.title
        ))
        .await?;
    let image_base64 =
        image.map(|img| base64::engine::general_purpose::STANDARD.encode(img.data));

    let title = state.translator.translate(&draft.title, None).await?;
    let mut steps = Vec::with_capacity(draft.steps.len());
    for step in &draft.steps {
        steps.push(state.translator.translate(step, None).await?);
    }

    Ok(PrettyJson(RecipeResponse {
        title,
        steps,
        image_base64,
    }))
}

fn build_prompt(ingredients: &[String], feeling: &str) -> String {
    format!(
        r#"You are a home cooking assistant. Create one recipe using these ingredients: {}. The cook is in the mood for something {}. Return the result strictly as a JSON object in the following format:

{{
    "title": "recipe title",
    "steps": ["step 1", "step 2"]
}}

Do not include any extra text or explanations. Ensure the output is valid JSON."#,
        ingredients.join(", "),
        feeling
    )
}
