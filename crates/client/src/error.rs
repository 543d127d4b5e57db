use grocer_core::envelope::{ApiError, ApiErrorBody};
use reqwest::{StatusCode, Url};
use serde_json::Value;

/// Everything that can go wrong between issuing a request and holding the
/// unwrapped payload.
///
/// The variants are deliberately distinct: a transport failure never
/// produced a response, a non-standard response is a protocol mismatch, and
/// only [`ClientError::Api`] means the server reported a business error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request did not complete or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not JSON at all.
    #[error("Response from {url} ({status}) is not valid JSON: {source}")]
    InvalidJson {
        status: StatusCode,
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but not a `{ status, data }` envelope.
    #[error("The response from {url} ({status}) is not a standard API response")]
    NotStandardResponse {
        status: StatusCode,
        url: Url,
        /// Decoded body, kept for diagnostics.
        body: Value,
    },

    /// The envelope was well formed but its payload has an unexpected shape.
    #[error("Unexpected payload from {url} ({status}): {source}")]
    Payload {
        status: StatusCode,
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with `status: "error"`.
    #[error(transparent)]
    Api(#[from] ApiError<ApiErrorBody>),

    /// An endpoint URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Convenience alias for accessor return values.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// The server's error payload, if this is an API error.
    pub fn api_error(&self) -> Option<&ApiError<ApiErrorBody>> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_not_standard(&self) -> bool {
        matches!(self, ClientError::NotStandardResponse { .. })
    }

    /// Message for end users: the server's own text for API errors, a
    /// generic one otherwise.
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Api(err) => err.user_message(),
            _ => "An error occurred",
        }
    }
}
