use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};

use crate::error::{ApiError, FieldError};

/// Types that can be validated from an already-decoded JSON body.
pub trait FromJsonValue: Sized {
    fn from_json(value: Value) -> Result<Self, Vec<FieldError>>;
}

/// JSON body extractor that rejects invalid payloads with a structured 422
/// before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: FromJsonValue,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content = is_json_content(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_body(&bytes, json_content)
            .map(ValidatedJson)
            .map_err(|errors| ApiError::validation(errors).into_response())
    }
}

/// Decode and validate a raw request body.
pub fn parse_body<T: FromJsonValue>(
    bytes: &[u8],
    json_content: bool,
) -> Result<T, Vec<FieldError>> {
    if bytes.is_empty() {
        return Err(vec![FieldError::body("missing", "Field required", Value::Null)]);
    }

    if !json_content {
        let raw = String::from_utf8_lossy(bytes).into_owned();
        return Err(vec![FieldError::body(
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
            Value::String(raw),
        )]);
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        vec![FieldError::new(
            "json_invalid",
            vec!["body".into(), byte_offset(bytes, e.line(), e.column()).into()],
            "JSON decode error",
            json!({}),
        )
        .with_ctx(json!({ "error": e.to_string() }))]
    })?;

    T::from_json(value)
}

/// A missing content type is treated as JSON.
fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Convert serde_json's 1-based line/column into a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocSegment;
    use crate::models::Item;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_content_type_detection() {
        assert!(is_json_content(&HeaderMap::new()));
        assert!(is_json_content(&headers_with("application/json")));
        assert!(is_json_content(&headers_with("application/json; charset=utf-8")));
        assert!(is_json_content(&headers_with("application/merge-patch+json")));
        assert!(!is_json_content(&headers_with("text/plain")));
        assert!(!is_json_content(&headers_with("application/x-www-form-urlencoded")));
    }

    #[test]
    fn test_parse_valid_body() {
        let item: Item = parse_body(br#"{"name":"widget","price":9.99}"#, true)
            .expect("valid body should parse");

        assert_eq!(item, Item::new("widget", 9.99));
    }

    #[test]
    fn test_empty_body_is_missing() {
        let errors = parse_body::<Item>(b"", true).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "missing");
        assert_eq!(errors[0].loc, vec![LocSegment::Key("body".to_string())]);
    }

    #[test]
    fn test_malformed_json_reports_offset() {
        let errors = parse_body::<Item>(br#"{"name": }"#, true).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "json_invalid");
        assert_eq!(errors[0].loc[0], LocSegment::Key("body".to_string()));
        assert!(errors[0].ctx.is_some());
    }

    #[test]
    fn test_non_json_content_type_rejected() {
        let errors = parse_body::<Item>(b"name=widget&price=1", false).unwrap_err();

        assert_eq!(errors[0].kind, "model_attributes_type");
        assert_eq!(errors[0].input, Value::String("name=widget&price=1".to_string()));
    }

    #[test]
    fn test_byte_offset() {
        let body = b"{\n  \"a\": x\n}";
        // line 2, column 8 points at the `x`
        assert_eq!(byte_offset(body, 2, 8), 9);
        assert_eq!(body[9], b'x');
        assert_eq!(byte_offset(body, 1, 1), 0);
    }
}
