//! Response decoder and unwrapper.
//!
//! [`decode_response`] turns a completed [`reqwest::Response`] into an
//! [`Envelope`], rejecting bodies that are not envelopes at all.
//! [`unwrap_response`] additionally routes the envelope through
//! [`get_success_data`], which is where a server-reported error becomes
//! [`ClientError::Api`].
//!
//! The HTTP status code is recorded on decoding failures for diagnostics but
//! never decides success: a 500 carrying a success envelope is a success.

use grocer_core::envelope::{get_success_data, ApiErrorBody, Envelope, EnvelopeError};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Read the body of `response` and decode it as an envelope.
pub async fn decode_response<T, E>(response: reqwest::Response) -> ClientResult<Envelope<T, E>>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let status = response.status();
    let url = response.url().clone();
    let bytes = response.bytes().await?;
    decode_body(status, url, &bytes)
}

/// Decode raw body bytes as an envelope.
///
/// `status` and `url` only feed the error variants.
pub fn decode_body<T, E>(status: StatusCode, url: Url, bytes: &[u8]) -> ClientResult<Envelope<T, E>>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(source) => return Err(ClientError::InvalidJson { status, url, source }),
    };

    Envelope::from_value(value).map_err(|err| match err {
        EnvelopeError::NotStandard(body) => {
            tracing::warn!(%url, %status, "Received a non-standard API response");
            ClientError::NotStandardResponse { status, url, body }
        }
        EnvelopeError::Payload(source) => ClientError::Payload {
            status,
            url,
            source,
        },
    })
}

/// Decode `response` and return the success payload.
pub async fn unwrap_response<T>(response: reqwest::Response) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let envelope = decode_response::<T, ApiErrorBody>(response).await?;
    get_success_data(envelope).map_err(|err| {
        tracing::warn!(
            error = %err.data.error,
            code = ?err.data.code,
            "API returned an error envelope",
        );
        ClientError::Api(err)
    })
}
