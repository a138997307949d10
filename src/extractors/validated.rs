//! Extractor that runs a rule set against the request before the handler.

use crate::error::AppError;
use crate::validation::{FieldRule, RequestInput, RequestValidator};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Typed handler input built from path parameters and a JSON body.
pub trait ValidatedInput: Sized {
    /// Rules evaluated, all of them, before [`ValidatedInput::from_input`].
    fn rules() -> Vec<FieldRule>;

    /// Build the value once every rule has passed.
    fn from_input(input: &RequestInput) -> Result<Self, AppError>;
}

/// Rejects with 400 and the full list of violations when any rule fails,
/// so the wrapped handler only ever sees valid input.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Validated<T>
where
    T: ValidatedInput + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();
        let is_json = has_json_content_type(&parts.headers);

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(IntoResponse::into_response)?;
        let body = parse_body(is_json, &bytes).map_err(IntoResponse::into_response)?;

        let input = RequestInput { params, body };
        let errors = RequestValidator::validate(&input, &T::rules());
        if !errors.is_empty() {
            tracing::debug!(violations = errors.len(), "request rejected by validation");
            return Err(AppError::Validation(errors).into_response());
        }
        T::from_input(&input)
            .map(Validated)
            .map_err(IntoResponse::into_response)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Non-JSON or empty bodies read as `{}`; so do JSON values that are not objects.
fn parse_body(is_json: bool, bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(AppError::BadRequest(format!("invalid JSON body: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert!(has_json_content_type(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!has_json_content_type(&headers));
    }

    #[test]
    fn bodies_that_are_not_objects_read_as_empty() {
        assert!(parse_body(true, b"").unwrap().is_empty());
        assert!(parse_body(true, b"[1, 2]").unwrap().is_empty());
        assert!(parse_body(false, br#"{"name": "ignored"}"#).unwrap().is_empty());
        assert_eq!(parse_body(true, br#"{"name": "Mouse"}"#).unwrap().len(), 1);
        assert!(parse_body(true, b"{not json").is_err());
    }
}
