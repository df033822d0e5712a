use serde::Serialize;
use sqlx::FromRow;

use crate::types::RecordId;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub status: String,
}
