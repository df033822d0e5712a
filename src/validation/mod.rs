//! Request-body validation core
//!
//! Shapes are static descriptors (no runtime reflection): each request body
//! type declares an ordered field list with wire names, primitive kinds and
//! validation rules. The decoder populates a wire-name keyed record from a
//! JSON or form body, and the engine evaluates every field's rules into a
//! per-field error map.

pub mod decode;
pub mod engine;
pub mod schema;

pub use decode::{decode_body, DecodeError, DecodedBody, Record, UploadedFile};
pub use engine::{validate, ErrorMap};
pub use schema::{FieldDescriptor, FieldKind, Rule, Schema};
