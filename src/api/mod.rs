//! Single-endpoint dispatcher: every storefront operation arrives as
//! `POST /api` with an `action`-tagged JSON body and leaves as a
//! `{success, ...}` envelope.

mod request;
mod response;

pub use request::{ApiRequest, ACTIONS};
pub use response::{ok, Envelope, MessagePayload, TokenPayload};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::instrument;

use crate::{auth, cart, catalog, error::ApiError, session::SessionContext, state::AppState};

/// `POST /api`. Parses the body, enforces the CSRF contract, routes to
/// the matching handler, then persists the session and sets the session
/// cookie for first-time callers.
#[instrument(skip_all)]
pub async fn dispatch(
    State(state): State<AppState>,
    mut ctx: SessionContext,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = route(&state, &mut ctx, body).await;
    let mut response = result.unwrap_or_else(|err| err.into_response());

    // Sessions that never gained state are not worth a store entry or a
    // cookie; anything else is written back with a refreshed TTL.
    if !ctx.is_untouched() {
        ctx.persist().await;
        if let Some(cookie) = ctx.issue_cookie(&state.config.session.cookie_name) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }
    response
}

async fn route(
    state: &AppState,
    ctx: &mut SessionContext,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(value) = body.map_err(|_| ApiError::InvalidRequest)?;

    let action = value
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ApiError::InvalidRequest)?
        .to_string();

    // The CSRF gate runs before anything else, even before the action
    // name is inspected; token issuance is the one exempt action.
    if action != "get_csrf_token" {
        let presented = value.get("csrf_token").and_then(Value::as_str);
        if !ctx.csrf_matches(presented) {
            return Err(ApiError::CsrfMismatch);
        }
    }

    if !ApiRequest::is_known_action(&action) {
        return Err(ApiError::InvalidAction);
    }

    // Known action, so a parse failure here means its fields are absent
    // or of the wrong shape.
    let request: ApiRequest =
        serde_json::from_value(value).map_err(|_| ApiError::MissingFields)?;

    match request {
        ApiRequest::Register(req) => Ok(ok(auth::handlers::register(state, req).await?)),
        ApiRequest::Login(req) => Ok(ok(auth::handlers::login(state, ctx, req).await?)),
        ApiRequest::GetProducts => Ok(ok(catalog::handlers::get_products(state).await?)),
        ApiRequest::GetProductDetails(req) => {
            Ok(ok(catalog::handlers::get_product_details(state, req).await?))
        }
        ApiRequest::AddToCart(req) => Ok(ok(cart::handlers::add_to_cart(state, ctx, req).await?)),
        ApiRequest::GetCartItems => Ok(ok(cart::handlers::get_cart_items(state, ctx).await?)),
        ApiRequest::UpdateCartQuantity(req) => {
            Ok(ok(cart::handlers::update_cart_quantity(state, ctx, req).await?))
        }
        ApiRequest::RemoveFromCart(req) => {
            Ok(ok(cart::handlers::remove_from_cart(state, ctx, req).await?))
        }
        ApiRequest::GetCsrfToken => Ok(ok(TokenPayload {
            token: ctx.csrf_token(),
        })),
    }
}
