//! Utility module - common helpers and types
//!
//! - [`AppError`] - application error type
//! - [`ApiResponse`] - uniform response envelope
//! - validation and logging helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{ApiResponse, AppError, Pagination};
pub use error::{ok, ok_message, ok_paginated};
pub use result::AppResult;
