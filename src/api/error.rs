use thiserror::Error;

/// Failures of a single JSON POST, after any retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("API request failed with status: {status}. Message: {message}")]
    Status { status: u16, message: String },

    /// No HTTP response at all (DNS, TLS, connection reset, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// A success status whose body is not JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// Every attempt hit a transient status
    #[error("API call failed after {attempts} attempts. {reason}")]
    Exhausted {
        attempts: u32,
        last_status: Option<u16>,
        reason: String,
    },
}

impl ApiError {
    /// Rate limiting and server errors are worth retrying, nothing else is.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => is_transient_status(*status),
            _ => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Exhausted { last_status, .. } => *last_status,
            _ => None,
        }
    }
}

pub fn is_transient_status(status: u16) -> bool {
    status == 429 || status >= 500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let status = |status| ApiError::Status { status, message: String::new() };
        assert!(status(429).is_transient());
        assert!(status(500).is_transient());
        assert!(status(503).is_transient());
        assert!(!status(400).is_transient());
        assert!(!status(404).is_transient());
        // A message mentioning 500 is still a transport failure
        assert!(!ApiError::Transport("proxy returned 500".into()).is_transient());
    }

    #[test]
    fn test_exhausted_message_names_attempts() {
        let error = ApiError::Exhausted {
            attempts: 5,
            last_status: Some(503),
            reason: "API request failed with status: 503. Message: Service Unavailable".into(),
        };
        assert!(error.to_string().starts_with("API call failed after 5 attempts."));
        assert_eq!(error.status(), Some(503));
    }
}
