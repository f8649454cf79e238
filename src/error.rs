//! Error types for Aries Bridge
//!
//! Handlers never map agent failures themselves: they return `Err(Error)` and
//! the `IntoResponse` impl below decides the final status code and body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::MessageResponse;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Agent returned {status}: {message}")]
    Agent { status: u16, message: String },

    #[error("Agent request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed request body: {0}")]
    MalformedBody(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Status code and client-facing message for this error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::Agent { status, message } => match StatusCode::from_u16(*status) {
                Ok(code) if code.is_client_error() => (code, message.clone()),
                _ => (StatusCode::BAD_GATEWAY, "Agent request failed".into()),
            },
            Error::Http(e) if e.is_timeout() => (
                StatusCode::GATEWAY_TIMEOUT,
                "Agent did not respond in time".into(),
            ),
            Error::Http(_) => (StatusCode::BAD_GATEWAY, "Agent unreachable".into()),
            Error::MalformedBody(_) => (StatusCode::BAD_REQUEST, "Malformed JSON body".into()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self);
        }

        (status, Json(MessageResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_client_errors_keep_their_status() {
        let err = Error::Agent {
            status: 404,
            message: "Schema not found".into(),
        };
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Schema not found");
    }

    #[test]
    fn agent_server_errors_become_bad_gateway() {
        let err = Error::Agent {
            status: 500,
            message: "ledger exploded".into(),
        };
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(message, "Agent request failed");
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let (status, _) = Error::MalformedBody(parse_err).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn config_errors_are_internal() {
        let (status, message) = Error::Config("bad".into()).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }
}
