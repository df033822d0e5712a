//! Request body shapes and their schema descriptors
//!
//! Each shape pairs a typed payload struct with a static `Schema` used by
//! the validation middleware. Wire names double as form field names, so a
//! failing field is reported under the same name clients sent it as.

use serde::Deserialize;

use crate::validation::{FieldDescriptor, FieldKind, Rule, Schema};

const STATUSES: &[&str] = &["ACTIVE", "INACTIVE"];

pub static USER_REGISTER: Schema = Schema {
    name: "user_register",
    fields: &[
        FieldDescriptor::new("name", FieldKind::Str, &[Rule::Required, Rule::MinLen(3)]),
        FieldDescriptor::new("email", FieldKind::Str, &[Rule::Required, Rule::Email]),
        FieldDescriptor::new("password", FieldKind::Str, &[Rule::Required, Rule::MinLen(6)]),
        FieldDescriptor::new("status", FieldKind::Str, &[Rule::Required, Rule::OneOf(STATUSES)]),
    ],
};

#[derive(Debug, Deserialize)]
pub struct UserRegister {
    pub name: String,
    pub email: String,
    pub password: String,
    pub status: String,
}

pub static USER_LOGIN: Schema = Schema {
    name: "user_login",
    fields: &[
        FieldDescriptor::new("email", FieldKind::Str, &[Rule::Required, Rule::Email]),
        FieldDescriptor::new("password", FieldKind::Str, &[Rule::Required, Rule::MinLen(6)]),
    ],
};

#[derive(Debug, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

pub static CATEGORY: Schema = Schema {
    name: "category",
    fields: &[
        FieldDescriptor::new("name", FieldKind::Str, &[Rule::Required, Rule::MinLen(3)]),
        FieldDescriptor::new("description", FieldKind::Str, &[]),
        FieldDescriptor::new("status", FieldKind::Str, &[Rule::Required, Rule::OneOf(STATUSES)]),
    ],
};

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub status: String,
}

pub static PRODUCT: Schema = Schema {
    name: "product",
    fields: &[
        FieldDescriptor::new("name", FieldKind::Str, &[Rule::Required]),
        FieldDescriptor::new("description", FieldKind::Str, &[Rule::Required]),
        FieldDescriptor::new("price", FieldKind::Float, &[Rule::Required]),
        FieldDescriptor::new("category_id", FieldKind::Str, &[Rule::Required]),
        FieldDescriptor::new("image", FieldKind::Str, &[]),
    ],
};

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub image: String,
}
