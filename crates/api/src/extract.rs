//! Request body extractor for cat payloads.
//!
//! Bodies are read as raw bytes so that an empty body, malformed JSON and
//! non-object JSON all map to the gateway's own 400 responses instead of
//! axum's default rejections. The `Content-Type` header is not inspected.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use crate::error::AppError;

/// A JSON object body. An empty body decodes to an empty object.
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject bodies with no fields at all.
    pub fn require_non_empty(self) -> Result<Self, AppError> {
        if self.is_empty() {
            return Err(AppError::BadRequest("Request body cannot be empty".into()));
        }
        Ok(self)
    }

    fn parse(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(AppError::BadRequest(
                "Request body must be a JSON object".into(),
            )),
            Err(e) => Err(AppError::BadRequest(format!("Malformed JSON body: {e}"))),
        }
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;
        Self::parse(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_body_is_an_empty_object() {
        assert!(JsonObject::parse(b"").unwrap().is_empty());
        assert!(JsonObject::parse(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn object_body_is_parsed() {
        let body = JsonObject::parse(br#"{"name":"Tom"}"#).unwrap();
        assert_eq!(body.0["name"], "Tom");
    }

    #[test]
    fn non_object_and_malformed_bodies_are_rejected() {
        assert_matches!(JsonObject::parse(b"[1,2]"), Err(AppError::BadRequest(_)));
        assert_matches!(JsonObject::parse(b"{\"name\":"), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn empty_object_fails_non_empty_check() {
        let body = JsonObject::parse(b"{}").unwrap();
        assert_matches!(
            body.require_non_empty(),
            Err(AppError::BadRequest(msg)) if msg == "Request body cannot be empty"
        );
    }
}
