//! Admin Account Seeding
//!
//! There is no registration endpoint; the only way an admin account comes to
//! exist is this startup seeder reading `ADMIN_USERNAME` / `ADMIN_PASSWORD`.
//! Seeding is idempotent and never blocks startup. The raw password is hashed
//! immediately and never logged.

use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Seed the admin account from the environment if it does not exist yet
pub async fn seed_admin(users: &UserRepository) -> AppResult<()> {
    let (username, password) = match (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(u), Ok(p)) if !u.trim().is_empty() && !p.is_empty() => (u.trim().to_string(), p),
        _ => {
            tracing::debug!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin seed");
            return Ok(());
        }
    };

    seed_admin_with(users, &username, &password).await
}

/// Create the named admin account unless it already exists
pub async fn seed_admin_with(
    users: &UserRepository,
    username: &str,
    password: &str,
) -> AppResult<()> {
    if users.find_by_username(username).await?.is_some() {
        tracing::debug!(username = %username, "admin account already exists");
        return Ok(());
    }

    let hash = User::hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
    users.create(username, &hash).await?;

    tracing::info!(username = %username, "admin account seeded");
    Ok(())
}
