//! Errors returned by [`CampaignClient`](crate::CampaignClient)

use thiserror::Error;

/// Result of a campaign page call
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures of a campaign page call
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, bad URL
    #[error("Could not reach the page: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Non-2xx reply from the page
    #[error("Page answered {status}: {message}")]
    ApiError {
        status: u16,
        /// Reply body, possibly empty
        message: String,
    },

    /// Reply body was not the expected JSON
    #[error("Unexpected reply: {0}")]
    ParseError(String),

    /// The page answered but reported `status: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Rejected locally before any request went out
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Builds a [`ClientError::ApiError`]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// The page (or list URL) does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// 4xx reply
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// 5xx reply
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ClientError::api_error(404, "gone").is_not_found());
        assert!(ClientError::api_error(403, "no").is_client_error());
        assert!(ClientError::api_error(502, "bad gateway").is_server_error());
        assert!(!ClientError::Rejected("no".to_string()).is_server_error());
    }
}
