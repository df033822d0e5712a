use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::models::Category;
use crate::dto::CategoryPayload;
use crate::error::ApiError;
use crate::middleware::ValidatedBody;
use crate::types::RecordId;

fn parse_id(id: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(id).map_err(|_| ApiError::bad_request("Invalid category ID"))
}

/// POST /api/categories - create a category
pub async fn category_post(
    Extension(body): Extension<ValidatedBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: CategoryPayload = body.parse()?;

    let pool = DatabaseManager::pool().await?;
    sqlx::query("INSERT INTO categories (id, name, description, status) VALUES ($1, $2, $3, $4)")
        .bind(RecordId::new())
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.status)
        .execute(pool)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Category created successfully" }))))
}

/// GET /api/categories - list all categories
pub async fn category_list() -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let categories: Vec<Category> =
        sqlx::query_as("SELECT id, name, description, status FROM categories ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(Json(json!({ "data": categories })))
}

/// GET /api/categories/:id - show one category
pub async fn category_get(Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;

    let pool = DatabaseManager::pool().await?;
    let category: Category =
        sqlx::query_as("SELECT id, name, description, status FROM categories WHERE id = $1")
            .bind(&id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(Json(json!({ "data": category })))
}

/// PATCH /api/categories/:id - update a category
pub async fn category_patch(
    Path(id): Path<String>,
    Extension(body): Extension<ValidatedBody>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let payload: CategoryPayload = body.parse()?;

    let pool = DatabaseManager::pool().await?;
    let result =
        sqlx::query("UPDATE categories SET name = $2, description = $3, status = $4 WHERE id = $1")
            .bind(&id)
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(&payload.status)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Category not found"));
    }

    Ok(Json(json!({ "message": "Category updated successfully" })))
}

/// DELETE /api/categories/:id - delete a category
pub async fn category_delete(Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;

    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(&id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Category not found"));
    }

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
