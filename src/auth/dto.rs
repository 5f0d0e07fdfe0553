use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Success payload for `register` and `login`: a human-readable message
/// plus the page the client should navigate to.
#[derive(Debug, Serialize)]
pub struct AuthOutcome {
    pub message: &'static str,
    pub redirect: &'static str,
}
