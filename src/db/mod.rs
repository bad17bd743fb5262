//! Database Module
//!
//! Embedded SurrealDB. Production runs on RocksDB at a path under the work
//! directory; tests use the in-memory engine.

pub mod models;
pub mod repository;

use crate::utils::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "catalog";
const DATABASE: &str = "catalog";

/// Open the embedded database at `path` and select the catalog namespace
pub async fn connect(path: &str) -> AppResult<Surreal<Db>> {
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
    tracing::info!(path, "database ready");
    Ok(db)
}
