//! Catalog Server
//!
//! Admin and storefront backend for an e-commerce catalog: products,
//! categories, brands and promotional banners over an embedded SurrealDB,
//! with JWT-authenticated mutations and local image storage.
//!
//! # Architecture
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`core`] | Config, shared state, HTTP server |
//! | [`api`] | HTTP routers and handlers |
//! | [`auth`] | JWT issuing/validation, auth middleware |
//! | [`db`] | Embedded database, models, repositories |
//! | [`services`] | Image store, admin seeding |
//! | [`utils`] | Errors, response envelope, validation, logging |

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - events land on the "security" target so they can
// be filtered into their own sink
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Initialize logging for the given configuration. File logging engages in
/// production when the logs directory already exists.
pub fn setup_environment(config: &Config) {
    let logs_dir = config.logs_dir();
    if config.is_production() && logs_dir.exists() {
        init_logger_with_file(None, logs_dir.to_str());
    } else {
        init_logger();
    }
}
