pub mod dto;
pub mod handlers;
pub mod repo;

/// Fixed size of the storefront's "latest products" strip.
pub const LATEST_PRODUCTS_LIMIT: i64 = 8;
