#![allow(dead_code)]

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::Response;
use serde_json::Value;

use storefront_api::auth::{generate_jwt, Claims};
use storefront_api::types::RecordId;

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Authorization header value for a freshly issued token
pub fn bearer_token() -> String {
    let claims = Claims::new("tester@example.com".to_string(), RecordId::new());
    let token = generate_jwt(claims).expect("token generation");
    format!("Bearer {}", token)
}

/// Build a multipart/form-data body from text fields; returns (content_type, body)
pub fn multipart_body(fields: &[(&str, &str)]) -> (String, String) {
    let boundary = "XTESTBOUNDARY";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\ncontent-disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            boundary, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", boundary));
    (format!("multipart/form-data; boundary={}", boundary), body)
}
