mod store;

pub use store::{MemorySessionStore, SessionStore};

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
};
use rand::RngCore;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Per-session state: who is logged in (if anyone) and the anti-forgery
/// token handed out by `get_csrf_token`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user_id: Option<Uuid>,
    pub csrf_token: Option<String>,
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Opaque session identifier, 32 random bytes hex-encoded.
pub fn new_session_token() -> String {
    random_hex(32)
}

/// Anti-forgery nonce, 32 random bytes hex-encoded (64 chars on the wire).
pub fn new_csrf_token() -> String {
    random_hex(32)
}

/// A request's view of its session: the token, the loaded (or freshly
/// created) session data, and a handle back to the store so handlers can
/// persist changes.
pub struct SessionContext {
    pub token: String,
    pub session: Session,
    fresh: bool,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// The logged-in user, or the uniform not-logged-in failure.
    pub fn require_user(&self) -> Result<Uuid, ApiError> {
        self.session.user_id.ok_or(ApiError::NotLoggedIn)
    }

    /// Returns the session's CSRF token, generating it on first use.
    pub fn csrf_token(&mut self) -> String {
        self.session
            .csrf_token
            .get_or_insert_with(new_csrf_token)
            .clone()
    }

    /// True when the presented token matches the stored one. A session
    /// that never asked for a token matches nothing.
    pub fn csrf_matches(&self, presented: Option<&str>) -> bool {
        match (&self.session.csrf_token, presented) {
            (Some(stored), Some(given)) => stored == given,
            _ => false,
        }
    }

    pub fn login(&mut self, user_id: Uuid) {
        self.session.user_id = Some(user_id);
    }

    /// True for a session created by this request that never gained any
    /// state. Persisting these would let cookie-less clients grow the
    /// store without bound, so the dispatcher drops them instead.
    pub fn is_untouched(&self) -> bool {
        self.fresh && self.session.user_id.is_none() && self.session.csrf_token.is_none()
    }

    /// Writes the session back to the store, refreshing its TTL.
    pub async fn persist(&self) {
        self.store.save(&self.token, self.session.clone()).await;
    }

    /// `Set-Cookie` value for sessions created by this request.
    pub fn issue_cookie(&self, cookie_name: &str) -> Option<HeaderValue> {
        if !self.fresh {
            return None;
        }
        let value = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            cookie_name, self.token
        );
        HeaderValue::from_str(&value).ok()
    }
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let raw = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then(|| v.to_string())
    })
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let store = state.sessions.clone();
        let cookie_name = &state.config.session.cookie_name;

        if let Some(token) = cookie_value(parts, cookie_name) {
            if let Some(session) = store.load(&token).await {
                return Ok(SessionContext {
                    token,
                    session,
                    fresh: false,
                    store,
                });
            }
        }

        // No cookie, or the token expired: start an anonymous session.
        Ok(SessionContext {
            token: new_session_token(),
            session: Session::default(),
            fresh: true,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_64_hex_chars() {
        let token = new_csrf_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(new_csrf_token(), token);
    }

    #[test]
    fn session_tokens_are_distinct() {
        assert_ne!(new_session_token(), new_session_token());
    }

    fn context_with(session: Session) -> SessionContext {
        SessionContext {
            token: new_session_token(),
            session,
            fresh: true,
            store: Arc::new(MemorySessionStore::new(time::Duration::minutes(5))),
        }
    }

    #[test]
    fn csrf_token_is_stable_once_generated() {
        let mut ctx = context_with(Session::default());
        let first = ctx.csrf_token();
        assert_eq!(ctx.csrf_token(), first);
        assert!(ctx.csrf_matches(Some(&first)));
    }

    #[test]
    fn csrf_never_matches_before_issuance() {
        let ctx = context_with(Session::default());
        assert!(!ctx.csrf_matches(Some("anything")));
        assert!(!ctx.csrf_matches(None));
    }

    #[test]
    fn require_user_rejects_anonymous_sessions() {
        let ctx = context_with(Session::default());
        assert!(matches!(ctx.require_user(), Err(ApiError::NotLoggedIn)));

        let user_id = Uuid::new_v4();
        let mut ctx = context_with(Session::default());
        ctx.login(user_id);
        assert_eq!(ctx.require_user().unwrap(), user_id);
    }

    #[test]
    fn untouched_means_fresh_and_stateless() {
        let mut ctx = context_with(Session::default());
        assert!(ctx.is_untouched());

        ctx.csrf_token();
        assert!(!ctx.is_untouched());

        let mut ctx = context_with(Session::default());
        ctx.login(Uuid::new_v4());
        assert!(!ctx.is_untouched());

        // A session loaded from the store is never untouched.
        let mut ctx = context_with(Session::default());
        ctx.fresh = false;
        assert!(!ctx.is_untouched());
    }

    #[test]
    fn fresh_sessions_issue_a_cookie() {
        let ctx = context_with(Session::default());
        let cookie = ctx.issue_cookie("sid").expect("fresh session sets cookie");
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with(&format!("sid={}", ctx.token)));
        assert!(cookie.contains("HttpOnly"));
    }
}
