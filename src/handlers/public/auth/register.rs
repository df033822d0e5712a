// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::{http::StatusCode, response::Json, Extension};

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::dto::UserRegister;
use crate::error::ApiError;
use crate::middleware::{UploadedFiles, ValidatedBody};
use crate::types::RecordId;

use super::utils::{hash_password, validate_upload};

/// POST /api/auth/register - create a user account
///
/// The body has already been validated by the middleware. An optional
/// multipart `image` part is checked against the configured extension and
/// size limits; only its filename is stored on the user record.
pub async fn register_post(
    Extension(body): Extension<ValidatedBody>,
    Extension(files): Extension<UploadedFiles>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let payload: UserRegister = body.parse()?;

    let uploads = &config::config().uploads;
    let image = files.named("image");
    if let Some(file) = image {
        validate_upload(file, &uploads.allowed_image_types, uploads.max_upload_bytes)
            .map_err(ApiError::bad_request)?;
        tracing::info!("Uploaded file: {}", file.file_name);
    }

    let user = User {
        id: RecordId::new(),
        name: payload.name,
        email: payload.email,
        password: hash_password(&payload.password),
        status: "active".to_string(),
        image: image.map(|f| f.file_name.clone()).unwrap_or_default(),
    };

    let pool = DatabaseManager::pool().await?;
    sqlx::query(
        "INSERT INTO users (id, name, email, password, status, image)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.status)
    .bind(&user.image)
    .execute(pool)
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}
