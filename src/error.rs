use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// One segment of the location of a failing value, e.g. `["body", "price"]`
/// or `["body", 17]` for a byte offset into malformed JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(index: usize) -> Self {
        LocSegment::Index(index)
    }
}

/// A single entry of a validation failure response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<LocSegment>,
    pub msg: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    pub fn new(
        kind: &'static str,
        loc: Vec<LocSegment>,
        msg: impl Into<String>,
        input: Value,
    ) -> Self {
        Self {
            kind,
            loc,
            msg: msg.into(),
            input,
            ctx: None,
        }
    }

    /// Error located on the request body as a whole.
    pub fn body(kind: &'static str, msg: impl Into<String>, input: Value) -> Self {
        Self::new(kind, vec!["body".into()], msg, input)
    }

    /// Error located on a named field of the request body.
    pub fn field(field: &str, kind: &'static str, msg: impl Into<String>, input: Value) -> Self {
        Self::new(kind, vec!["body".into(), field.into()], msg, input)
    }

    pub fn with_ctx(mut self, ctx: Value) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// The field name this error points at, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self.loc.get(1) {
            Some(LocSegment::Key(name)) => Some(name.as_str()),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(
                    fields = ?errors.iter().filter_map(FieldError::field_name).collect::<Vec<_>>(),
                    "Request validation failed"
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": errors })),
                )
                    .into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "detail": "Method Not Allowed" })),
            )
                .into_response(),
        }
    }
}
