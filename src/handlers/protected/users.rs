use axum::response::Json;

use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::error::ApiError;

/// GET /api/users - list all users
pub async fn users_get() -> Result<Json<Vec<User>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let users: Vec<User> = sqlx::query_as(
        "SELECT id, name, email, password, status, image FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    // password is skipped during serialization
    Ok(Json(users))
}
