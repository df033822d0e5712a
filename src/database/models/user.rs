use serde::Serialize;
use sqlx::FromRow;

use crate::types::RecordId;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    /// Salted digest, never exposed through the API
    #[serde(skip_serializing)]
    pub password: String,
    pub status: String,
    pub image: String,
}
