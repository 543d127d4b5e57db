//! The `{ "status": "success" | "error", "data": ... }` response envelope.
//!
//! Every endpoint wraps its payload in an [`Envelope`]. The `status` tag is
//! the only discriminator: HTTP status codes are informational and never
//! override it.
//!
//! Decoding is deliberately shallow. [`Envelope::from_value`] only checks
//! that the value looks like an envelope (an object carrying both `status`
//! and `data` with a known tag); anything else is reported as
//! [`EnvelopeError::NotStandard`] rather than coerced into one of the two
//! variants.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator carried in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    /// Parse the wire tag. Any value other than the two known tags is
    /// not part of the protocol.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(Status::Success),
            "error" => Some(Status::Error),
            _ => None,
        }
    }
}

/// A decoded response: either the success payload `T` or the error
/// payload `E`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Envelope<T, E = ApiErrorBody> {
    Success(T),
    Error(E),
}

/// Base error payload every `status: "error"` response carries.
///
/// `code` is optional because not every server path sets it. Extra fields
/// beyond the base shape are kept in `details` so callers can still inspect
/// endpoint-specific error data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error summary.
    pub error: String,
    /// Machine-readable error code, when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Longer user-facing message, when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any additional fields of the error payload.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ApiErrorBody {
    /// Error payload with only the `error` field set.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            message: None,
            details: Map::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Paginated list payload.
///
/// Part of the protocol's type surface; none of the grocery endpoints
/// currently return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithPagination<T> {
    pub total_results: u64,
    pub pagination: Pagination,
    pub list: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub results: u64,
    pub page: u64,
}

/// Reasons a JSON value could not be turned into an [`Envelope`].
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The value is not `{ status, data }` with a known tag.
    #[error("The response is not a standard API response")]
    NotStandard(Value),

    /// The envelope is well formed but `data` does not match the expected
    /// payload type.
    #[error("Unexpected envelope payload: {0}")]
    Payload(#[source] serde_json::Error),
}

impl<T, E> Envelope<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error(_))
    }

    pub fn status(&self) -> Status {
        match self {
            Envelope::Success(_) => Status::Success,
            Envelope::Error(_) => Status::Error,
        }
    }

    /// Convert into a plain `Result` without wrapping the error payload.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Error(data) => Err(data),
        }
    }
}

impl<T, E> Envelope<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    /// Validate the envelope shape of an already-parsed JSON value.
    ///
    /// The value must be an object with both a `status` and a `data` key,
    /// and `status` must be `"success"` or `"error"`. The payload is then
    /// deserialized into `T` or `E` according to the tag.
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let Value::Object(mut map) = value else {
            return Err(EnvelopeError::NotStandard(value));
        };

        let status = map
            .get("status")
            .and_then(Value::as_str)
            .and_then(Status::from_tag);
        let Some(status) = status else {
            return Err(EnvelopeError::NotStandard(Value::Object(map)));
        };
        let Some(data) = map.remove("data") else {
            return Err(EnvelopeError::NotStandard(Value::Object(map)));
        };

        match status {
            Status::Success => serde_json::from_value(data)
                .map(Envelope::Success)
                .map_err(EnvelopeError::Payload),
            Status::Error => serde_json::from_value(data)
                .map(Envelope::Error)
                .map_err(EnvelopeError::Payload),
        }
    }
}

/// Free-standing form of [`Envelope::is_success`].
pub fn is_api_success<T, E>(envelope: &Envelope<T, E>) -> bool {
    envelope.is_success()
}

/// Free-standing form of [`Envelope::is_error`].
pub fn is_api_error<T, E>(envelope: &Envelope<T, E>) -> bool {
    envelope.is_error()
}

/// The server answered with `status: "error"`.
///
/// Carries the error payload exactly as received so callers can branch on
/// `code` or show `error` / `message` to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("API error")]
pub struct ApiError<E = ApiErrorBody> {
    pub data: E,
}

impl ApiError<ApiErrorBody> {
    /// Text suitable for showing to a user: the server's `message` when
    /// present, otherwise its `error` summary.
    pub fn user_message(&self) -> &str {
        self.data.message.as_deref().unwrap_or(&self.data.error)
    }

    pub fn code(&self) -> Option<&str> {
        self.data.code.as_deref()
    }
}

/// Extract the success payload, or fail with an [`ApiError`] carrying the
/// error payload.
///
/// This is the single point where a decoded response becomes a control-flow
/// fork; every accessor routes through it.
pub fn get_success_data<T, E>(envelope: Envelope<T, E>) -> Result<T, ApiError<E>> {
    match envelope {
        Envelope::Success(data) => Ok(data),
        Envelope::Error(data) => Err(ApiError { data }),
    }
}
