use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{error::ApiError, session::SessionContext, state::AppState};

use super::dto::{AuthOutcome, LoginRequest, RegisterRequest};
use super::password::{hash_password, verify_password};
use super::repo::User;

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, req))]
pub async fn register(state: &AppState, mut req: RegisterRequest) -> Result<AuthOutcome, ApiError> {
    req.email = req.email.trim().to_lowercase();

    if req.first_name.trim().is_empty()
        || req.last_name.trim().is_empty()
        || req.email.is_empty()
        || req.password.is_empty()
    {
        return Err(ApiError::MissingFields);
    }
    if !is_valid_email(&req.email) {
        warn!(email = %req.email, "invalid email");
        return Err(ApiError::InvalidEmail);
    }

    let hash = hash_password(&req.password)?;

    let user = match User::create(
        &state.db,
        req.first_name.trim(),
        req.last_name.trim(),
        &req.email,
        &hash,
    )
    .await
    {
        Ok(u) => u,
        // Only a genuine unique-constraint hit maps to the duplicate
        // message; everything else stays a generic failure.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(email = %req.email, "email already registered");
            return Err(ApiError::EmailTaken);
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(AuthOutcome {
        message: "Registration successful.",
        redirect: "login.html",
    })
}

#[instrument(skip(state, ctx, req))]
pub async fn login(
    state: &AppState,
    ctx: &mut SessionContext,
    mut req: LoginRequest,
) -> Result<AuthOutcome, ApiError> {
    req.email = req.email.trim().to_lowercase();

    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %req.email, "login unknown email");
            ApiError::UserNotFound
        })?;

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::IncorrectPassword);
    }

    ctx.login(user.id);
    info!(user_id = %user.id, "user logged in");
    Ok(AuthOutcome {
        message: "Login successful.",
        redirect: "index.html",
    })
}
