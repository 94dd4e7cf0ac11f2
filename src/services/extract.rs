//! Best-effort extraction of structured data from model replies.
//!
//! The upstream models are asked for strict JSON but do not reliably
//! produce it. Raw replies are classified first and interpreted second,
//! so the failure modes stay explicit: a fenced block that parses, a
//! fenced block that does not (a reportable error), or free text that
//! is handled line by line.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::{IngredientList, RecipeDraft};

pub const UNKNOWN_RECIPE_TITLE: &str = "Unknown Recipe";

static FENCED_JSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").unwrap());

static BRACKET_LIST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[(.*?)\]").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("model returned a fenced block that is not valid JSON: {0}")]
    MalformedFencedJson(#[from] serde_json::Error),
}

/// A model reply, classified before interpretation.
#[derive(Debug)]
pub enum ModelOutput {
    /// A ```json fenced block containing a valid JSON object.
    FencedJson(Value),
    /// No fenced block; the non-blank lines of the raw text, cleaned.
    Fallback(Vec<String>),
    /// Blank raw text.
    Empty,
}

/// Classify a raw model reply.
///
/// A fenced block that is located but fails to parse is an error, kept
/// distinct from "no fenced block found" which degrades to line-based
/// handling.
pub fn classify(raw: &str) -> Result<ModelOutput, ExtractError> {
    if let Some(caps) = FENCED_JSON_RE.captures(raw) {
        let value: Value = serde_json::from_str(caps[1].trim())?;
        return Ok(ModelOutput::FencedJson(value));
    }

    if raw.trim().is_empty() {
        return Ok(ModelOutput::Empty);
    }

    Ok(ModelOutput::Fallback(clean_lines(raw)))
}

/// Parse the vision model's reply into an ingredient list.
///
/// Without a fenced block this path first scans for a bracket-delimited
/// span and takes its lines; only when no bracket is present either does
/// it degrade to the generic line fallback. The recipe path skips the
/// bracket stage on purpose.
pub fn parse_ingredients(raw: &str) -> Result<IngredientList, ExtractError> {
    let ingredients = match classify(raw)? {
        ModelOutput::FencedJson(value) => string_list(&value, "ingredients"),
        ModelOutput::Empty => Vec::new(),
        ModelOutput::Fallback(lines) => match bracket_span(raw) {
            Some(interior) => clean_lines(interior),
            None => lines,
        },
    };

    Ok(IngredientList { ingredients })
}

/// Parse the recipe model's reply into a title and ordered steps.
pub fn parse_recipe(raw: &str) -> Result<RecipeDraft, ExtractError> {
    let draft = match classify(raw)? {
        ModelOutput::FencedJson(value) => RecipeDraft {
            title: value
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_RECIPE_TITLE.to_string()),
            steps: string_list(&value, "steps"),
        },
        ModelOutput::Empty => RecipeDraft {
            title: UNKNOWN_RECIPE_TITLE.to_string(),
            steps: Vec::new(),
        },
        ModelOutput::Fallback(lines) => RecipeDraft {
            title: UNKNOWN_RECIPE_TITLE.to_string(),
            steps: lines,
        },
    };

    Ok(draft)
}

/// Non-blank lines, each stripped of surrounding whitespace and quotes.
fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim().trim_matches('"').to_string())
        .collect()
}

fn bracket_span(raw: &str) -> Option<&str> {
    BRACKET_LIST_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
