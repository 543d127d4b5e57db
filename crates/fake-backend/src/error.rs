use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use grocer_core::envelope::{ApiErrorBody, Envelope};

/// Failures the fake backend reports as `status: "error"` envelopes.
#[derive(Debug, thiserror::Error)]
pub enum FakeError {
    /// Injected upstream failure on the list endpoint.
    #[error("Server is under maintenance, please retry")]
    Maintenance,

    /// The cart write body was not a JSON number.
    #[error("Invalid item ID")]
    InvalidItemId,

    /// The cart write named an id that is not in the catalogue.
    #[error("Item not found")]
    ItemNotFound,
}

pub type FakeResult<T> = Result<T, FakeError>;

impl FakeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FakeError::Maintenance => StatusCode::INTERNAL_SERVER_ERROR,
            FakeError::InvalidItemId => StatusCode::BAD_REQUEST,
            FakeError::ItemNotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FakeError::Maintenance => "MAINTENANCE",
            FakeError::InvalidItemId => "INVALID_ITEM_ID",
            FakeError::ItemNotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for FakeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "Returning injected server error");
        }

        let body: Envelope<(), ApiErrorBody> =
            Envelope::Error(ApiErrorBody::new(self.to_string()).with_code(self.code()));

        (status, Json(body)).into_response()
    }
}
