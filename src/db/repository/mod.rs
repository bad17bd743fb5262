//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB catalog tables.

// Auth
pub mod user;

// Catalog
pub mod banner;
pub mod brand;
pub mod category;
pub mod product;

// Re-exports
pub use banner::BannerRepository;
pub use brand::BrandRepository;
pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::{Id, Thing};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" everywhere outside the database layer
// =============================================================================
//
// Handlers pass ids around as strings and may hand over either the pure key
// or the full "table:id" form. Repositories normalize with these helpers
// before touching the database.

/// Build a record pointer from a table name and an id that may or may not
/// carry the table prefix.
pub fn make_thing(table: &str, id: &str) -> Thing {
    let pure_id = strip_table_prefix(table, id);
    Thing::from((table, Id::from(pure_id)))
}

/// Strip a leading `table:` prefix if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => key,
        _ => id,
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefix_only_for_matching_table() {
        assert_eq!(strip_table_prefix("category", "category:abc"), "abc");
        assert_eq!(strip_table_prefix("category", "abc"), "abc");
        // Foreign prefix stays untouched
        assert_eq!(strip_table_prefix("category", "brand:abc"), "brand:abc");
    }

    #[test]
    fn make_thing_accepts_both_forms() {
        let a = make_thing("product", "xyz");
        let b = make_thing("product", "product:xyz");
        assert_eq!(a, b);
        assert_eq!(a.tb, "product");
    }
}
