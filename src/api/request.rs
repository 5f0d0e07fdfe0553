use serde::Deserialize;

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::cart::dto::{AddToCartRequest, RemoveFromCartRequest, UpdateCartQuantityRequest};
use crate::catalog::dto::ProductDetailsRequest;

/// The closed set of actions the API accepts. The `action` tag in the
/// request body selects the variant, so dispatch is an exhaustive match
/// instead of a string table with a default arm.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ApiRequest {
    Register(RegisterRequest),
    Login(LoginRequest),
    GetProducts,
    GetProductDetails(ProductDetailsRequest),
    AddToCart(AddToCartRequest),
    GetCartItems,
    UpdateCartQuantity(UpdateCartQuantityRequest),
    RemoveFromCart(RemoveFromCartRequest),
    GetCsrfToken,
}

/// Wire names of every action, used to tell "unknown action" apart from
/// "known action with missing fields" when deserialization fails.
pub const ACTIONS: &[&str] = &[
    "register",
    "login",
    "get_products",
    "get_product_details",
    "add_to_cart",
    "get_cart_items",
    "update_cart_quantity",
    "remove_from_cart",
    "get_csrf_token",
];

impl ApiRequest {
    pub fn is_known_action(action: &str) -> bool {
        ACTIONS.contains(&action)
    }
}
