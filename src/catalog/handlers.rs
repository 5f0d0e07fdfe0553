use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::dto::{ProductDetailsRequest, ProductPayload, ProductsPayload};
use super::repo::Product;
use super::LATEST_PRODUCTS_LIMIT;

#[instrument(skip(state))]
pub async fn get_products(state: &AppState) -> Result<ProductsPayload, ApiError> {
    let products = Product::list_latest(&state.db, LATEST_PRODUCTS_LIMIT).await?;
    Ok(ProductsPayload { products })
}

#[instrument(skip(state))]
pub async fn get_product_details(
    state: &AppState,
    req: ProductDetailsRequest,
) -> Result<ProductPayload, ApiError> {
    let product = Product::find_by_id(&state.db, req.product_id)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    Ok(ProductPayload { product })
}
