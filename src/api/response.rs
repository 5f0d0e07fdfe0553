use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Uniform success envelope: `success: true` plus the action's payload
/// keys flattened alongside it.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

pub fn ok<T: Serialize>(payload: T) -> Response {
    Json(Envelope {
        success: true,
        payload,
    })
    .into_response()
}

#[derive(Debug, Serialize)]
pub struct MessagePayload {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TokenPayload {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keys_sit_next_to_success() {
        let envelope = Envelope {
            success: true,
            payload: MessagePayload {
                message: "Cart updated.",
            },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Cart updated.");
    }

    #[test]
    fn token_payload_uses_the_shared_envelope() {
        let envelope = Envelope {
            success: true,
            payload: TokenPayload {
                token: "ab".repeat(32),
            },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["token"].as_str().unwrap().len(), 64);
    }
}
