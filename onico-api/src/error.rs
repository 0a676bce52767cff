use serde::Deserialize;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("{0}")]
    Server(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Credential storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Build the error for a non-2xx response, preferring the server's message.
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                message: Some(message),
            }) => ApiError::Server(message),
            _ => ApiError::Server(format!("server error, code {}", status)),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Error bodies share the envelope shape; only the message matters here.
#[derive(Debug, Clone, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_used_when_present() {
        let err = ApiError::from_status(409, br#"{"data":null,"message":"Slot already taken"}"#);
        assert!(matches!(err, ApiError::Server(ref m) if m == "Slot already taken"));
    }

    #[test]
    fn status_code_is_synthesized_without_message() {
        let err = ApiError::from_status(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "server error, code 502");

        let err = ApiError::from_status(500, br#"{"data":null,"message":null}"#);
        assert_eq!(err.to_string(), "server error, code 500");
    }
}
