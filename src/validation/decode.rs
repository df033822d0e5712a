//! Request-body decoding
//!
//! JSON bodies are parsed in one pass against the shape's wire names; form
//! bodies (multipart or urlencoded) are looked up field by field with
//! primitive coercion. Form coercion is lenient: a numeric or identifier
//! field that fails to parse keeps its zero value and is left for the
//! validation engine to report.

use std::collections::HashMap;

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Multipart};
use axum::http::{header, Request};
use serde_json::Value;

use super::schema::{FieldKind, Schema};
use crate::types::RecordId;

/// A request body populated against a shape, keyed by wire name. Every
/// schema field is present; absent input leaves the kind's zero value.
pub type Record = serde_json::Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed request body")]
    Malformed,
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(String),
}

/// File part captured from a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercased filename extension, if any
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Outcome of decoding: the populated record plus any multipart file parts
#[derive(Debug, Clone, Default)]
pub struct DecodedBody {
    pub record: Record,
    pub files: Vec<UploadedFile>,
}

/// Decode a raw body against a shape, dispatching on the declared
/// content type
pub async fn decode_body(
    schema: &Schema,
    content_type: &str,
    bytes: Bytes,
) -> Result<DecodedBody, DecodeError> {
    if content_type.contains("application/json") {
        Ok(DecodedBody { record: decode_json(schema, &bytes)?, files: Vec::new() })
    } else if content_type.contains("multipart/form-data") {
        decode_multipart(schema, content_type, bytes).await
    } else if content_type.contains("application/x-www-form-urlencoded") {
        Ok(DecodedBody { record: decode_urlencoded(schema, &bytes), files: Vec::new() })
    } else {
        Err(DecodeError::UnsupportedContentType(content_type.to_string()))
    }
}

/// Record with every field at its kind's zero value
fn zero_record(schema: &Schema) -> Record {
    let mut record = Record::new();
    for field in schema.fields {
        record.insert(field.wire_name().to_string(), zero_value(field.kind));
    }
    record
}

fn zero_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Str => Value::String(String::new()),
        FieldKind::Int => Value::from(0i64),
        FieldKind::Float => Value::from(0.0f64),
        FieldKind::Id => Value::String(RecordId::nil().to_string()),
    }
}

fn decode_json(schema: &Schema, bytes: &[u8]) -> Result<Record, DecodeError> {
    let body: Value = serde_json::from_slice(bytes).map_err(|_| DecodeError::Malformed)?;
    let Value::Object(body) = body else {
        return Err(DecodeError::Malformed);
    };

    let mut record = zero_record(schema);
    for field in schema.fields {
        let wire = field.wire_name();
        match body.get(wire) {
            // absent and null both leave the zero value; required-ness is
            // checked later by the validation engine
            None | Some(Value::Null) => {}
            Some(value) => {
                let coerced = coerce_json(field.kind, value).ok_or(DecodeError::Malformed)?;
                record.insert(wire.to_string(), coerced);
            }
        }
    }
    Ok(record)
}

/// Strict JSON coercion: a type mismatch fails the whole decode
fn coerce_json(kind: FieldKind, value: &Value) -> Option<Value> {
    match kind {
        FieldKind::Str => value.as_str().map(|s| Value::String(s.to_string())),
        FieldKind::Int => value.as_i64().map(Value::from),
        FieldKind::Float => value.as_f64().map(Value::from),
        FieldKind::Id => value
            .as_str()
            .and_then(|s| RecordId::parse(s).ok())
            .map(|id| Value::String(id.to_string())),
    }
}

fn decode_urlencoded(schema: &Schema, bytes: &[u8]) -> Record {
    let values: HashMap<String, String> = url::form_urlencoded::parse(bytes)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    populate_from_form(schema, &values)
}

async fn decode_multipart(
    schema: &Schema,
    content_type: &str,
    bytes: Bytes,
) -> Result<DecodedBody, DecodeError> {
    // Rebuild a minimal request so the multipart extractor can pick up the
    // boundary from the content-type header
    let request = Request::builder()
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .map_err(|_| DecodeError::Malformed)?;

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|_| DecodeError::Malformed)?;

    let mut values: HashMap<String, String> = HashMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|_| DecodeError::Malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(|_| DecodeError::Malformed)?;
            files.push(UploadedFile { field: name, file_name, content_type, bytes });
        } else {
            let text = field.text().await.map_err(|_| DecodeError::Malformed)?;
            values.insert(name, text);
        }
    }

    Ok(DecodedBody { record: populate_from_form(schema, &values), files })
}

/// Form population: present, non-empty values are coerced by kind; parse
/// failures on numeric and identifier kinds keep the zero value
fn populate_from_form(schema: &Schema, values: &HashMap<String, String>) -> Record {
    let mut record = zero_record(schema);
    for field in schema.fields {
        let wire = field.wire_name();
        let Some(raw) = values.get(wire) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let value = match field.kind {
            FieldKind::Str => Value::String(raw.clone()),
            FieldKind::Int => match raw.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => continue,
            },
            FieldKind::Float => match raw.parse::<f64>() {
                Ok(n) => Value::from(n),
                Err(_) => continue,
            },
            FieldKind::Id => match RecordId::parse(raw) {
                Ok(id) => Value::String(id.to_string()),
                Err(_) => continue,
            },
        };
        record.insert(wire.to_string(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::schema::{FieldDescriptor, Rule};

    static SHAPE: Schema = Schema {
        name: "test",
        fields: &[
            FieldDescriptor::new("name", FieldKind::Str, &[Rule::Required]),
            FieldDescriptor::new("count", FieldKind::Int, &[]),
            FieldDescriptor::new("price", FieldKind::Float, &[Rule::Required]),
            FieldDescriptor::new("category_id", FieldKind::Id, &[]),
        ],
    };

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn json_decode_populates_all_schema_fields() {
        let body = Bytes::from(r#"{"name":"Desk","price":19.5}"#);
        let decoded = decode_body(&SHAPE, "application/json", body).await.unwrap();

        // every schema field is present, absent ones at their zero value
        assert_eq!(decoded.record["name"], "Desk");
        assert_eq!(decoded.record["price"], 19.5);
        assert_eq!(decoded.record["count"], 0);
        assert_eq!(decoded.record["category_id"], RecordId::nil().to_string());
    }

    #[tokio::test]
    async fn json_syntax_error_is_malformed() {
        let res = decode_body(&SHAPE, "application/json", Bytes::from("not-json")).await;
        assert!(matches!(res, Err(DecodeError::Malformed)));
    }

    #[tokio::test]
    async fn json_type_mismatch_is_malformed() {
        let body = Bytes::from(r#"{"name":42}"#);
        let res = decode_body(&SHAPE, "application/json", body).await;
        assert!(matches!(res, Err(DecodeError::Malformed)));

        // non-integral number into an integer field
        let body = Bytes::from(r#"{"count":1.5}"#);
        let res = decode_body(&SHAPE, "application/json", body).await;
        assert!(matches!(res, Err(DecodeError::Malformed)));
    }

    #[tokio::test]
    async fn json_null_leaves_zero_value() {
        let body = Bytes::from(r#"{"name":null,"price":2.0}"#);
        let decoded = decode_body(&SHAPE, "application/json", body).await.unwrap();
        assert_eq!(decoded.record["name"], "");
        assert_eq!(decoded.record["price"], 2.0);
    }

    #[test]
    fn form_coercion_is_lenient_on_parse_failure() {
        let record = populate_from_form(
            &SHAPE,
            &form(&[("name", "Desk"), ("count", "abc"), ("price", "abc"), ("category_id", "xyz")]),
        );
        assert_eq!(record["name"], "Desk");
        assert_eq!(record["count"], 0);
        assert_eq!(record["price"], 0.0);
        assert_eq!(record["category_id"], RecordId::nil().to_string());
    }

    #[test]
    fn form_coerces_each_kind() {
        let record = populate_from_form(
            &SHAPE,
            &form(&[
                ("name", "Desk"),
                ("count", "7"),
                ("price", "19.5"),
                ("category_id", "507f1f77bcf86cd799439011"),
            ]),
        );
        assert_eq!(record["count"], 7);
        assert_eq!(record["price"], 19.5);
        assert_eq!(record["category_id"], "507f1f77bcf86cd799439011");
    }

    #[test]
    fn empty_form_values_keep_zero() {
        let record = populate_from_form(&SHAPE, &form(&[("name", ""), ("count", "")]));
        assert_eq!(record["name"], "");
        assert_eq!(record["count"], 0);
    }

    #[tokio::test]
    async fn urlencoded_bodies_decode_as_form() {
        let body = Bytes::from("name=Desk&price=19.5");
        let decoded = decode_body(&SHAPE, "application/x-www-form-urlencoded", body)
            .await
            .unwrap();
        assert_eq!(decoded.record["name"], "Desk");
        assert_eq!(decoded.record["price"], 19.5);
    }

    #[tokio::test]
    async fn multipart_bodies_decode_fields_and_files() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\ncontent-disposition: form-data; name=\"name\"\r\n\r\nDesk\r\n\
             --{b}\r\ncontent-disposition: form-data; name=\"price\"\r\n\r\nabc\r\n\
             --{b}\r\ncontent-disposition: form-data; name=\"image\"; filename=\"desk.png\"\r\n\
             content-type: image/png\r\n\r\nPNGDATA\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let content_type = format!("multipart/form-data; boundary={}", boundary);
        let decoded = decode_body(&SHAPE, &content_type, Bytes::from(body)).await.unwrap();

        assert_eq!(decoded.record["name"], "Desk");
        // lenient float coercion
        assert_eq!(decoded.record["price"], 0.0);

        assert_eq!(decoded.files.len(), 1);
        let file = &decoded.files[0];
        assert_eq!(file.field, "image");
        assert_eq!(file.file_name, "desk.png");
        assert_eq!(file.extension().as_deref(), Some("png"));
    }

    #[tokio::test]
    async fn other_content_types_are_unsupported() {
        let res = decode_body(&SHAPE, "text/plain", Bytes::from("name=Desk")).await;
        assert!(matches!(res, Err(DecodeError::UnsupportedContentType(_))));

        let res = decode_body(&SHAPE, "", Bytes::new()).await;
        assert!(matches!(res, Err(DecodeError::UnsupportedContentType(_))));
    }
}
