//! Success response helper.
//!
//! All successful responses use the `{ "status": "success", "data": ... }`
//! envelope. Use [`DataResponse`] instead of ad-hoc `json!` bodies so the
//! wire shape always comes from [`Envelope`]'s serializer.

use axum::response::{IntoResponse, Response};
use axum::Json;
use grocer_core::envelope::{ApiErrorBody, Envelope};
use serde::Serialize;

/// Success envelope around any serializable payload.
#[derive(Debug)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(Envelope::<T, ApiErrorBody>::Success(self.data)).into_response()
    }
}
