//! Startup schema bootstrap
//!
//! Creates the catalog tables when missing and ensures the unique indexes
//! the API relies on. Which fields must be unique per table lives in one
//! place here; add more pairs as collections grow.

use sqlx::PgPool;
use tracing::{info, warn};

use super::manager::{DatabaseError, DatabaseManager};

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'active',
        image TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        price DOUBLE PRECISION NOT NULL DEFAULT 0,
        image TEXT NOT NULL DEFAULT '',
        category_id TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL,
        created_by TEXT NOT NULL,
        updated_by TEXT NOT NULL
    )",
];

/// (table, field) pairs that carry a unique index
const UNIQUE_FIELDS: &[(&str, &str)] = &[
    ("users", "email"),
    ("products", "name"),
    ("categories", "name"),
];

/// Connect and make sure tables and unique indexes exist
pub async fn ensure_schema() -> Result<(), DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }

    create_unique_indexes(pool).await;
    Ok(())
}

async fn create_unique_indexes(pool: &PgPool) {
    for (table, field) in UNIQUE_FIELDS {
        let ddl = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {table}_{field}_unique ON {table} ({field})"
        );
        match sqlx::query(&ddl).execute(pool).await {
            Ok(_) => info!("Unique index on {} field ensured for table {}", field, table),
            // keep going; a failed index never blocks startup
            Err(e) => warn!("Could not create unique index for {}.{}: {}", table, field, e),
        }
    }
}
