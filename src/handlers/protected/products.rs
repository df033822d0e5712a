use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::database::manager::DatabaseManager;
use crate::database::models::Product;
use crate::dto::ProductPayload;
use crate::error::ApiError;
use crate::middleware::{AuthUser, ValidatedBody};
use crate::types::RecordId;

/// Product row joined with its category and creating user
#[derive(Debug, FromRow)]
struct ProductJoinRow {
    id: RecordId,
    name: String,
    description: String,
    price: f64,
    image: String,
    category_id: RecordId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: RecordId,
    updated_by: RecordId,
    category_name: Option<String>,
    category_description: Option<String>,
    category_status: Option<String>,
    creator_name: Option<String>,
    creator_email: Option<String>,
    creator_status: Option<String>,
    creator_image: Option<String>,
}

const PRODUCT_JOIN_SQL: &str = "
    SELECT p.id, p.name, p.description, p.price, p.image, p.category_id,
           p.created_at, p.updated_at, p.created_by, p.updated_by,
           c.name AS category_name, c.description AS category_description,
           c.status AS category_status,
           u.name AS creator_name, u.email AS creator_email,
           u.status AS creator_status, u.image AS creator_image
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN users u ON u.id = p.created_by";

/// Nest the joined columns the way clients expect: `category` embedded,
/// `created_by` replaced with the creating user (password excluded)
fn product_to_api_value(row: ProductJoinRow) -> Value {
    let category = row.category_name.map(|name| {
        json!({
            "id": row.category_id,
            "name": name,
            "description": row.category_description,
            "status": row.category_status,
        })
    });

    let created_by = row.creator_name.map(|name| {
        json!({
            "id": row.created_by,
            "name": name,
            "email": row.creator_email,
            "status": row.creator_status,
            "image": row.creator_image,
        })
    });

    json!({
        "id": row.id,
        "name": row.name,
        "description": row.description,
        "price": row.price,
        "image": row.image,
        "category": category,
        "created_at": row.created_at,
        "updated_at": row.updated_at,
        "created_by": created_by,
        "updated_by": row.updated_by,
    })
}

/// POST /api/products - create a product
pub async fn product_post(
    Extension(auth_user): Extension<AuthUser>,
    Extension(body): Extension<ValidatedBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: ProductPayload = body.parse()?;

    let category_id = RecordId::parse(&payload.category_id)
        .map_err(|_| ApiError::bad_request("Invalid category ID"))?;

    let pool = DatabaseManager::pool().await?;

    // the referenced category must exist
    let category_exists: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM categories WHERE id = $1")
        .bind(&category_id)
        .fetch_optional(pool)
        .await?;
    if category_exists.is_none() {
        return Err(ApiError::bad_request("Category not found"));
    }

    let now = Utc::now();
    let product = Product {
        id: RecordId::new(),
        name: payload.name,
        description: payload.description,
        price: payload.price,
        image: payload.image,
        category_id,
        created_at: now,
        updated_at: now,
        created_by: auth_user.user_id.clone(),
        updated_by: auth_user.user_id,
    };

    sqlx::query(
        "INSERT INTO products (id, name, description, price, image, category_id,
                               created_at, updated_at, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(&product.image)
    .bind(&product.category_id)
    .bind(product.created_at)
    .bind(product.updated_at)
    .bind(&product.created_by)
    .bind(&product.updated_by)
    .execute(pool)
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Product created successfully" }))))
}

/// GET /api/products - list products with embedded category and creator
pub async fn product_list() -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let rows: Vec<ProductJoinRow> =
        sqlx::query_as(&format!("{} ORDER BY p.id", PRODUCT_JOIN_SQL))
            .fetch_all(pool)
            .await?;

    let products: Vec<Value> = rows.into_iter().map(product_to_api_value).collect();
    Ok(Json(json!({ "data": products })))
}

/// GET /api/products/:id - show one product with embedded category and creator
pub async fn product_get(Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = RecordId::parse(&id).map_err(|_| ApiError::bad_request("Invalid product ID format"))?;

    let pool = DatabaseManager::pool().await?;
    let row: ProductJoinRow = sqlx::query_as(&format!("{} WHERE p.id = $1", PRODUCT_JOIN_SQL))
        .bind(&id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(json!({ "data": product_to_api_value(row) })))
}

/// PATCH /api/products/:id - update a product
pub async fn product_patch(
    Path(id): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(body): Extension<ValidatedBody>,
) -> Result<Json<Value>, ApiError> {
    let id = RecordId::parse(&id).map_err(|_| ApiError::bad_request("Invalid product ID format"))?;

    let payload: ProductPayload = body.parse()?;
    let category_id = RecordId::parse(&payload.category_id)
        .map_err(|_| ApiError::bad_request("Invalid category ID"))?;

    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query(
        "UPDATE products
         SET name = $2, description = $3, price = $4, image = $5, category_id = $6,
             updated_at = $7, updated_by = $8
         WHERE id = $1",
    )
    .bind(&id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(&payload.image)
    .bind(&category_id)
    .bind(Utc::now())
    .bind(&auth_user.user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(Json(json!({ "message": "Product updated successfully" })))
}
