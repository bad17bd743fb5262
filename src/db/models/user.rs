//! Admin user model
//!
//! Users are created only by the seed service, never through the HTTP
//! surface. The password hash is an argon2 PHC string and never serialized
//! outward or logged.

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type UserId = Thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<UserId>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2 with a fresh random salt
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = User::hash_password("Bait@2024#").unwrap();
        let user = User {
            id: None,
            username: "admin".to_string(),
            password_hash: hash,
        };
        assert!(user.verify_password("Bait@2024#").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = User {
            id: None,
            username: "admin".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
