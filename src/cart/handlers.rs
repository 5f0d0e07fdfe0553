use tracing::{info, instrument};

use crate::{
    api::MessagePayload, error::ApiError, session::SessionContext, state::AppState,
};

use super::dto::{
    AddToCartRequest, CartItemsPayload, RemoveFromCartRequest, UpdateCartQuantityRequest,
};
use super::repo;

#[instrument(skip(state, ctx))]
pub async fn add_to_cart(
    state: &AppState,
    ctx: &SessionContext,
    req: AddToCartRequest,
) -> Result<MessagePayload, ApiError> {
    let user_id = ctx.require_user()?;

    let quantity = i32::try_from(req.quantity).map_err(|_| ApiError::InvalidQuantity)?;
    if quantity <= 0 {
        return Err(ApiError::InvalidQuantity);
    }

    match repo::upsert_item(&state.db, user_id, req.product_id, quantity).await {
        Ok(()) => {}
        // Unknown product surfaces as a foreign-key violation.
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            return Err(ApiError::NotFound("Product"));
        }
        Err(e) => return Err(e.into()),
    }

    info!(%user_id, product_id = %req.product_id, quantity, "added to cart");
    Ok(MessagePayload {
        message: "Product added to cart.",
    })
}

#[instrument(skip(state, ctx))]
pub async fn get_cart_items(
    state: &AppState,
    ctx: &SessionContext,
) -> Result<CartItemsPayload, ApiError> {
    let user_id = ctx.require_user()?;
    let cart_items = repo::list_for_user(&state.db, user_id).await?;
    Ok(CartItemsPayload { cart_items })
}

#[instrument(skip(state, ctx))]
pub async fn update_cart_quantity(
    state: &AppState,
    ctx: &SessionContext,
    req: UpdateCartQuantityRequest,
) -> Result<MessagePayload, ApiError> {
    let user_id = ctx.require_user()?;

    // Zero or negative means the line goes away.
    let rows = if req.quantity <= 0 {
        repo::delete_item(&state.db, user_id, req.cart_item_id).await?
    } else {
        let quantity = i32::try_from(req.quantity).map_err(|_| ApiError::InvalidQuantity)?;
        repo::set_quantity(&state.db, user_id, req.cart_item_id, quantity).await?
    };

    if rows == 0 {
        return Err(ApiError::NotFound("Cart item"));
    }
    info!(%user_id, cart_item_id = %req.cart_item_id, quantity = req.quantity, "cart updated");
    Ok(MessagePayload {
        message: "Cart updated.",
    })
}

#[instrument(skip(state, ctx))]
pub async fn remove_from_cart(
    state: &AppState,
    ctx: &SessionContext,
    req: RemoveFromCartRequest,
) -> Result<MessagePayload, ApiError> {
    let user_id = ctx.require_user()?;

    let rows = repo::delete_item(&state.db, user_id, req.cart_item_id).await?;
    if rows == 0 {
        return Err(ApiError::NotFound("Cart item"));
    }
    info!(%user_id, cart_item_id = %req.cart_item_id, "removed from cart");
    Ok(MessagePayload {
        message: "Item removed from cart.",
    })
}
