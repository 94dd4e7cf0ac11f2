//! Request and response shapes for the recipe service.
//!
//! Required request fields are modelled as `Option`s so that a missing
//! key deserializes cleanly and validation can answer with the exact
//! per-field error message instead of a generic deserialization error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DetectIngredientsRequest {
    /// Base64-encoded image bytes, forwarded to the vision model as-is.
    pub image: Option<String>,
    pub mime_type: Option<String>,
}

/// Ordered ingredient names extracted from the vision model's reply.
#[derive(Debug, Serialize, PartialEq)]
pub struct IngredientList {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRecipeRequest {
    pub ingredients: Option<Vec<String>>,
    pub feeling: Option<String>,
}

/// Parsed recipe before translation and illustration.
#[derive(Debug, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub title: String,
    pub steps: Vec<String>,
    pub image_base64: Option<String>,
}
