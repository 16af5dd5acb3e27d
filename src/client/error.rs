use thiserror::Error;

/// Errors returned by the guestbook API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("{error}")]
    Api {
        status: u16,
        error: String,
        details: Option<String>,
    },

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the visitor
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api {
                error,
                details: Some(details),
                ..
            } => format!("{}: {}", error, details),
            other => other.to_string(),
        }
    }
}
