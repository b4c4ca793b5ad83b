// src/error.rs
//! Client-side error taxonomy shared by every request path

use reqwest::StatusCode;
use serde::Deserialize;

use crate::realtime::CallState;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected before any request was sent
    #[error("validation error: {0}")]
    Validation(String),

    /// Rejected by the server's request validation (400/422)
    #[error("bad request {status}: {message}")]
    BadRequest { status: u16, message: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid call state transition: {0} -> {1}")]
    InvalidTransition(CallState, CallState),
}

/// Error body returned by the backend. `message` is either a plain string
/// or the list produced by request validation.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<ErrorMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ClientError {
    /// Map a non-success HTTP status and its raw body to the taxonomy
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);
        match status.as_u16() {
            code @ (400 | 422) => ClientError::BadRequest {
                status: code,
                message,
            },
            401 => ClientError::Unauthorized(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            code @ 500..=599 => ClientError::Server {
                status: code,
                message,
            },
            code => ClientError::UnexpectedStatus {
                status: code,
                message,
            },
        }
    }

    /// Whether repeating the same request later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Timeout(_) | ClientError::Server { .. }
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Conflict(_) => Some(409),
            ClientError::BadRequest { status, .. }
            | ClientError::Server { status, .. }
            | ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::from_status(status, "")
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "Unknown error".to_string();
    }

    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(ErrorBody {
            message: Some(ErrorMessage::One(msg)),
            ..
        }) => msg,
        Ok(ErrorBody {
            message: Some(ErrorMessage::Many(msgs)),
            ..
        }) if !msgs.is_empty() => msgs.join("; "),
        Ok(ErrorBody {
            error: Some(err), ..
        }) => err,
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, ""),
            ClientError::BadRequest { status: 400, .. }
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, ""),
            ClientError::BadRequest { status: 422, .. }
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, ""),
            ClientError::Unauthorized(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, ""),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, ""),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::CONFLICT, ""),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, ""),
            ClientError::Server { status: 502, .. }
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ClientError::UnexpectedStatus { status: 418, .. }
        ));
    }

    #[test]
    fn test_message_extraction() {
        let err = ClientError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"statusCode":401,"message":"Invalid credentials"}"#,
        );
        assert_eq!(err.to_string(), "unauthorized: Invalid credentials");

        let err = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":["email must be an email","password too short"]}"#,
        );
        assert_eq!(
            err.to_string(),
            "bad request 400: email must be an email; password too short"
        );

        let err = ClientError::from_status(StatusCode::NOT_FOUND, r#"{"error":"Offre not found"}"#);
        assert_eq!(err.to_string(), "not found: Offre not found");

        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "upstream crashed");
        assert_eq!(err.to_string(), "server error 500: upstream crashed");

        let err = ClientError::from_status(StatusCode::NOT_FOUND, "   ");
        assert_eq!(err.to_string(), "not found: Unknown error");
    }

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::Network("reset".into()).is_transient());
        assert!(ClientError::Timeout("30s".into()).is_transient());
        assert!(ClientError::Server {
            status: 503,
            message: String::new()
        }
        .is_transient());
        assert!(!ClientError::NotFound("x".into()).is_transient());
        assert!(!ClientError::Unauthorized("x".into()).is_transient());
        assert!(!ClientError::Decode("x".into()).is_transient());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(ClientError::NotFound("x".into()).status(), Some(404));
        assert_eq!(
            ClientError::from_status(StatusCode::SERVICE_UNAVAILABLE, "").status(),
            Some(503)
        );
        assert_eq!(ClientError::Network("x".into()).status(), None);
        assert_eq!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "").status(),
            Some(422)
        );
        assert_eq!(ClientError::Validation("local".into()).status(), None);
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = ClientError::InvalidTransition(CallState::Idle, CallState::InCall);
        assert_eq!(err.to_string(), "invalid call state transition: idle -> in_call");
    }
}
