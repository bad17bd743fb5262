//! Database Models

// Serde helpers
pub mod serde_thing;

// Auth
pub mod user;

// Catalog
pub mod banner;
pub mod brand;
pub mod category;
pub mod product;

pub use banner::{Banner, BannerCreate, BannerUpdate};
pub use brand::{Brand, BrandCreate, BrandUpdate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use product::{
    Product, ProductCreate, ProductFilter, ProductReplace, ProductSort, ProductView,
};
pub use user::User;
