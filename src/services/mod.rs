//! Services Module

pub mod admin_seed;
pub mod image_store;

pub use image_store::ImageStore;
