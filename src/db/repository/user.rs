//! User Repository
//!
//! Admin accounts only; there is no public registration path. Records are
//! written by the startup seeder and read by the login handler.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::User;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user by exact username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Count all users
    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM user GROUP ALL")
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Create a user. The password hash must already be computed; raw
    /// passwords never reach this layer.
    ///
    /// The hash is bound explicitly because [`User`] never serializes it.
    pub async fn create(&self, username: &str, password_hash: &str) -> RepoResult<User> {
        let username = username.to_string();
        let password_hash = password_hash.to_string();
        let mut result = self
            .base
            .db()
            .query("CREATE user CONTENT { username: $username, passwordHash: $hash }")
            .bind(("username", username))
            .bind(("hash", password_hash))
            .await?;
        let created: Vec<User> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
