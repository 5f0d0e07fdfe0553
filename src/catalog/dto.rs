use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::Product;

#[derive(Debug, Deserialize)]
pub struct ProductDetailsRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ProductsPayload {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductPayload {
    pub product: Product,
}
