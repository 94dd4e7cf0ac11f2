//! HTTP handlers for the recipe service.

pub mod health;
pub mod ingredients;
pub mod recipes;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON responder that pretty-prints with 2-space indentation.
///
/// `serde_json` leaves non-ASCII characters unescaped, so translated
/// strings appear literally in the response body.
pub struct PrettyJson<T>(pub T);

impl<T> IntoResponse for PrettyJson<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                format!("{{\n  \"error\": \"{}\"\n}}", err),
            )
                .into_response(),
        }
    }
}
