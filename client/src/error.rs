//! Client error types.

use http::StatusCode;
use thiserror::Error;

use crate::response::ApiResponse;
use crate::transport::BoxError;

/// Errors returned by the signal client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The call was made without a request context.
    #[error("context must be non-nil")]
    InvalidContext,

    /// The context deadline expired before the exchange completed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// The context was cancelled before the exchange completed.
    #[error("context canceled")]
    Cancelled,

    /// The request path could not be resolved against the base URL.
    #[error("could not resolve url `{url}`: {source}")]
    UrlResolution {
        /// The path or URL that failed to resolve.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be serialized to JSON.
    #[error("could not encode request payload: {0}")]
    PayloadEncoding(#[source] serde_json::Error),

    /// The token cannot be sent as an HTTP header value.
    #[error("session token is not a valid header value")]
    InvalidToken(#[source] http::header::InvalidHeaderValue),

    /// The HTTP exchange failed before a complete response was read.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The backend rejected or required the session token (401).
    #[error("api error: access token is missing or invalid")]
    AuthToken(ApiResponse),

    /// The backend rejected one or more of the submitted entities (422).
    #[error("api error: one of the provided signal is invalid")]
    InvalidSignal(ApiResponse),

    /// The backend answered with an unexpected status code.
    #[error("api error: response with status code {}", .0.status)]
    Api(ApiResponse),

    /// A non-empty response body could not be decoded.
    #[error("could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A required value was not provided.
    #[error("unexpected nil value")]
    NilValue,

    /// The trace has no signal data.
    #[error("unexpected empty trace data")]
    EmptyData,

    /// The batch has no element.
    #[error("unexpected empty batch")]
    EmptyBatch,
}

impl ClientError {
    /// Returns the response attached to a status error.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::AuthToken(response) | Self::InvalidSignal(response) | Self::Api(response) => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Returns the HTTP status of a status error.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|response| response.status)
    }

    /// Returns true if the error comes from the request context.
    #[must_use]
    pub fn is_context_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidContext | Self::DeadlineExceeded | Self::Cancelled
        )
    }
}
