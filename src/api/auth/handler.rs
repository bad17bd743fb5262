//! Auth API Handlers
//!
//! Login and the authenticated identity endpoint. Unknown usernames and
//! wrong passwords produce the same 401 so accounts cannot be enumerated.
//! Raw passwords are never logged.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, MAX_USERNAME_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the envelope carries the token directly
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Authenticated identity as returned by `GET /api/auth/admin`
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: String,
    pub username: String,
}

/// `GET /api/auth/admin` envelope: the identity sits under `user`
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub success: bool,
    pub message: String,
    pub user: AdminInfo,
}

/// Shape checks on the login payload. Failures here are 400s; 401 is
/// reserved for credentials that have the right shape but do not match.
fn validate_login_payload(username: &str, password: &str) -> AppResult<()> {
    validate_required_text(username, "username", MAX_USERNAME_LEN)?;
    validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
    Ok(())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = payload.username.trim();
    validate_login_payload(username, &payload.password)?;

    let repo = UserRepository::new(state.get_db());
    let user = match repo.find_by_username(username).await? {
        Some(user) => user,
        None => {
            security_log!("WARN", "login_failed", username = username.to_string());
            return Err(AppError::invalid_credentials());
        }
    };

    let verified = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !verified {
        security_log!("WARN", "login_failed", username = username.to_string());
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .as_ref()
        .map(|t| t.to_raw())
        .ok_or_else(|| AppError::internal("User record has no id"))?;
    let token = state
        .jwt_service()
        .generate_token(&user_id, &user.username)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!("INFO", "login_success", username = user.username.clone());

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
    }))
}

/// GET /api/auth/admin - identity behind the token
pub async fn admin(user: CurrentUser) -> AppResult<Json<AdminResponse>> {
    Ok(Json(AdminResponse {
        success: true,
        message: "Admin fetched successfully".to_string(),
        user: AdminInfo {
            id: user.id,
            username: user.username,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_login_payload_is_a_validation_error() {
        assert!(matches!(
            validate_login_payload("", ""),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_login_payload("admin", ""),
            Err(AppError::Validation(_))
        ));
        let overlong = "x".repeat(MAX_USERNAME_LEN + 1);
        assert!(matches!(
            validate_login_payload(&overlong, "S3cret!pass"),
            Err(AppError::Validation(_))
        ));
        assert!(validate_login_payload("admin", "S3cret!pass").is_ok());
    }

    #[test]
    fn admin_envelope_puts_identity_under_user() {
        let body = serde_json::to_value(AdminResponse {
            success: true,
            message: "Admin fetched successfully".to_string(),
            user: AdminInfo {
                id: "user:abc".to_string(),
                username: "admin".to_string(),
            },
        })
        .unwrap();
        assert_eq!(body["user"]["id"], "user:abc");
        assert_eq!(body["user"]["username"], "admin");
        assert!(body.get("data").is_none());
    }
}
