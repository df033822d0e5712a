use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::types::RecordId;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category_id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: RecordId,
    pub updated_by: RecordId,
}
