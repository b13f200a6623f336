//! Request body extraction

use crate::handlers::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use schoolhub_core::Error;
use serde::de::DeserializeOwned;

/// JSON body whose failures render as the portal error envelope
///
/// An absent body is read as `{}`, so fields with serde defaults still
/// reach the handler's own checks. Malformed JSON and missing required
/// fields reject with [`Error::Validation`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

fn invalid_body(message: impl Into<String>) -> ApiError {
    ApiError(Error::Validation {
        field: "body".to_string(),
        message: message.into(),
    })
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| invalid_body(format!("unreadable request body: {e}")))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw)
            .map(JsonBody)
            .map_err(|e| invalid_body(format!("invalid JSON: {e}")))
    }
}
