// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::dto::UserLogin;
use crate::error::ApiError;
use crate::middleware::ValidatedBody;

use super::utils::verify_password;

/// POST /api/auth/login - verify credentials and issue a JWT
pub async fn login_post(
    Extension(body): Extension<ValidatedBody>,
) -> Result<Json<Value>, ApiError> {
    let credentials: UserLogin = body.parse()?;

    let pool = DatabaseManager::pool().await?;
    let user: User = sqlx::query_as(
        "SELECT id, name, email, password, status, image FROM users WHERE email = $1",
    )
    .bind(&credentials.email)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !verify_password(&credentials.password, &user.password) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = generate_jwt(Claims::new(user.email.clone(), user.id.clone()))?;

    Ok(Json(json!({ "token": token })))
}
