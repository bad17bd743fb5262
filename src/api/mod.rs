//! API Module
//!
//! One submodule per HTTP resource, each exposing a `router()` merged by the
//! server.

pub mod multipart;

pub mod auth;
pub mod banners;
pub mod brands;
pub mod categories;
pub mod images;
pub mod products;
