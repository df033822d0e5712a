//! Shape-parameterized request body gate
//!
//! Wired per route as
//! `middleware::from_fn(|req, next| validate_body(&dto::SHAPE, req, next))`.
//! The gate decodes the body against the shape, runs the validation engine,
//! and either short-circuits with a 400 or stores the populated record in
//! request extensions for the handler.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config;
use crate::error::ApiError;
use crate::validation::{decode_body, validate, Record, Schema, UploadedFile};

/// Request extension carrying the validated body record
#[derive(Debug, Clone)]
pub struct ValidatedBody(pub Record);

impl ValidatedBody {
    /// Deserialize the record into its typed payload
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            tracing::error!("validated body did not match payload type: {}", e);
            ApiError::internal_server_error("Failed to read request body")
        })
    }
}

/// Request extension with multipart file parts captured during decoding
#[derive(Debug, Clone, Default)]
pub struct UploadedFiles(pub Vec<UploadedFile>);

impl UploadedFiles {
    pub fn named(&self, field: &str) -> Option<&UploadedFile> {
        self.0.iter().find(|f| f.field == field)
    }
}

/// Decode and validate the request body against a shape, then pass the
/// populated record to the next handler
pub async fn validate_body(schema: &'static Schema, request: Request, next: Next) -> Response {
    match gate(schema, request).await {
        Ok(request) => next.run(request).await,
        Err(response) => response,
    }
}

async fn gate(schema: &'static Schema, request: Request) -> Result<Request, Response> {
    let (parts, body) = request.into_parts();

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let limit = config::config().server.max_request_size_bytes;
    let bytes = to_bytes(body, limit)
        .await
        .map_err(|_| ApiError::InvalidBody.into_response())?;

    let decoded = decode_body(schema, &content_type, bytes)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    let errors = validate(schema, &decoded.record);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors).into_response());
    }

    // body is consumed; handlers read the record from extensions
    let mut request = Request::from_parts(parts, Body::empty());
    request.extensions_mut().insert(ValidatedBody(decoded.record));
    request.extensions_mut().insert(UploadedFiles(decoded.files));
    Ok(request)
}
