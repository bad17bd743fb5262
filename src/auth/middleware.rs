//! Authentication middleware
//!
//! Axum middleware enforcing JWT authentication on the admin surface.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Catalog prefixes whose reads are public (storefront traffic)
const PUBLIC_READ_PREFIXES: [&str; 4] = [
    "/api/products",
    "/api/categories",
    "/api/brands",
    "/api/banners",
];

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`.
/// On success a [`CurrentUser`] is injected into request extensions.
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/` (uploaded images, 404s)
/// - `/api/auth/login`
/// - `GET` requests on the catalog read surface
///
/// # Errors
///
/// | Failure | Status |
/// |---------|--------|
/// | Missing Authorization header | 401 Unauthorized |
/// | Expired token | 401 Token expired |
/// | Anything else wrong with the token | 401 Invalid token |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight skips authentication
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip authentication (they 404 or serve images)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // Public API routes
    if path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }
    let is_public_read = req.method() == http::Method::GET
        && PUBLIC_READ_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")));
    if is_public_read {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or_else(AppError::invalid_token)?
        }
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_read_prefix_matching() {
        let matches = |path: &str| {
            PUBLIC_READ_PREFIXES
                .iter()
                .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
        };
        assert!(matches("/api/products"));
        assert!(matches("/api/products/product:abc"));
        assert!(matches("/api/banners"));
        // Prefix must be a whole path segment
        assert!(!matches("/api/productsx"));
        assert!(!matches("/api/auth/admin"));
    }
}
