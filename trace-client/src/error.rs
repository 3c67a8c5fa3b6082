//! Client error types
//!
//! Every API call funnels its failure into one of three kinds so views have
//! a single handling pattern.

use thiserror::Error;

/// Client error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Backend answered 401: stored credentials are invalid or missing
    #[error("Invalid credentials")]
    Unauthorized,

    /// Backend answered with an error payload; the message is shown verbatim
    #[error("{0}")]
    Application(String),

    /// No usable response (connect failure, timeout, undecodable body)
    #[error("Network error or unexpected issue {context}.")]
    Network {
        /// What the call was doing, e.g. "fetching products"
        context: &'static str,
        /// Underlying cause, for logs only
        detail: String,
    },
}

impl ClientError {
    pub(crate) fn network(context: &'static str, detail: impl ToString) -> Self {
        Self::Network {
            context,
            detail: detail.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
