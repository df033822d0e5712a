//! Declarative field validation
//!
//! Every field's rules are evaluated against the populated record,
//! independent of other fields, and failures accumulate into a wire-name
//! keyed map. All rule kinds render the same "<field> is required" message.

use std::collections::HashMap;

use serde_json::Value;

use super::decode::Record;
use super::schema::{FieldDescriptor, FieldKind, Rule, Schema};
use crate::types::RecordId;

/// External field name -> human-readable message
pub type ErrorMap = HashMap<String, String>;

/// Validate a populated record against its shape. An empty map means the
/// record passed.
pub fn validate(schema: &Schema, record: &Record) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in schema.fields {
        let wire = field.wire_name();
        let value = record.get(wire);
        if field.rules.iter().any(|rule| !passes(field, rule, value)) {
            errors.insert(wire.to_string(), format!("{} is required", wire));
        }
    }
    errors
}

fn passes(field: &FieldDescriptor, rule: &Rule, value: Option<&Value>) -> bool {
    match rule {
        Rule::Required => !is_zero(field.kind, value),
        Rule::MinLen(min) => match value.and_then(Value::as_str) {
            Some(s) => s.chars().count() >= *min,
            // not meaningful on non-string kinds
            None => true,
        },
        Rule::Range { min, max } => match value.and_then(Value::as_f64) {
            Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
            None => false,
        },
        Rule::OneOf(members) => match value.and_then(Value::as_str) {
            Some(s) => members.contains(&s),
            None => false,
        },
        Rule::Email => match value.and_then(Value::as_str) {
            Some(s) => email_shaped(s),
            None => false,
        },
    }
}

/// Whether the value equals its kind's zero value (absent counts as zero)
fn is_zero(kind: FieldKind, value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return true;
    };
    match kind {
        FieldKind::Str => value.as_str().map_or(true, str::is_empty),
        FieldKind::Int => value.as_i64().map_or(true, |n| n == 0),
        FieldKind::Float => value.as_f64().map_or(true, |n| n == 0.0),
        FieldKind::Id => value
            .as_str()
            .map_or(true, |s| s.is_empty() || RecordId::parse(s).map_or(true, |id| id.is_nil())),
    }
}

/// Structural email check: local and domain parts around a single '@',
/// with a dot somewhere in the address
fn email_shaped(value: &str) -> bool {
    if value.is_empty() || !value.contains('.') {
        return false;
    }
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::decode::{decode_body, DecodeError};
    use axum::body::Bytes;

    static SHAPE: Schema = Schema {
        name: "category",
        fields: &[
            FieldDescriptor::new("name", FieldKind::Str, &[Rule::Required, Rule::MinLen(3)]),
            FieldDescriptor::new("description", FieldKind::Str, &[]),
            FieldDescriptor::new(
                "status",
                FieldKind::Str,
                &[Rule::Required, Rule::OneOf(&["ACTIVE", "INACTIVE"])],
            ),
        ],
    };

    async fn decode_json(body: &str) -> Result<Record, DecodeError> {
        decode_body(&SHAPE, "application/json", Bytes::from(body.to_string()))
            .await
            .map(|d| d.record)
    }

    #[tokio::test]
    async fn min_length_failure_reports_single_entry() {
        let record = decode_json(r#"{"name":"ab","status":"ACTIVE"}"#).await.unwrap();
        let errors = validate(&SHAPE, &record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["name"], "name is required");
    }

    #[tokio::test]
    async fn valid_record_yields_empty_map() {
        let record = decode_json(r#"{"name":"Desks","status":"ACTIVE"}"#).await.unwrap();
        assert!(validate(&SHAPE, &record).is_empty());
    }

    #[tokio::test]
    async fn one_of_is_case_sensitive() {
        let record = decode_json(r#"{"name":"Desks","status":"active"}"#).await.unwrap();
        let errors = validate(&SHAPE, &record);
        assert_eq!(errors["status"], "status is required");
    }

    #[tokio::test]
    async fn missing_required_fields_all_reported_together() {
        let record = decode_json("{}").await.unwrap();
        let errors = validate(&SHAPE, &record);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("status"));
        // optional field never reports
        assert!(!errors.contains_key("description"));
    }

    #[tokio::test]
    async fn validation_is_idempotent() {
        let record = decode_json(r#"{"name":"ab"}"#).await.unwrap();
        assert_eq!(validate(&SHAPE, &record), validate(&SHAPE, &record));
    }

    #[test]
    fn email_rule_uses_uniform_message() {
        static LOGIN: Schema = Schema {
            name: "login",
            fields: &[FieldDescriptor::new("email", FieldKind::Str, &[Rule::Required, Rule::Email])],
        };

        let mut record = Record::new();
        record.insert("email".into(), Value::from("not-an-email"));
        let errors = validate(&LOGIN, &record);
        assert_eq!(errors["email"], "email is required");

        record.insert("email".into(), Value::from("user@example.com"));
        assert!(validate(&LOGIN, &record).is_empty());
    }

    #[test]
    fn email_shapes() {
        assert!(email_shaped("user@example.com"));
        assert!(email_shaped("a.b@c.d"));
        assert!(!email_shaped(""));
        assert!(!email_shaped("user"));
        assert!(!email_shaped("user@nodot"));
        assert!(!email_shaped("@example.com"));
        assert!(!email_shaped("user@"));
        assert!(!email_shaped("a@b@c.com"));
    }

    #[test]
    fn range_rule_checks_declared_bounds() {
        static QTY: Schema = Schema {
            name: "qty",
            fields: &[FieldDescriptor::new(
                "count",
                FieldKind::Int,
                &[Rule::Range { min: Some(1.0), max: Some(10.0) }],
            )],
        };

        let mut record = Record::new();
        record.insert("count".into(), Value::from(5));
        assert!(validate(&QTY, &record).is_empty());

        record.insert("count".into(), Value::from(0));
        assert_eq!(validate(&QTY, &record)["count"], "count is required");

        record.insert("count".into(), Value::from(11));
        assert_eq!(validate(&QTY, &record)["count"], "count is required");
    }

    #[test]
    fn required_id_fails_on_nil() {
        static REF: Schema = Schema {
            name: "ref",
            fields: &[FieldDescriptor::new("category_id", FieldKind::Id, &[Rule::Required])],
        };

        let mut record = Record::new();
        record.insert("category_id".into(), Value::from(RecordId::nil().to_string()));
        assert_eq!(validate(&REF, &record)["category_id"], "category_id is required");

        record.insert("category_id".into(), Value::from("507f1f77bcf86cd799439011"));
        assert!(validate(&REF, &record).is_empty());
    }
}
