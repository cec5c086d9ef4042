//! Response capture and status classification.
//!
//! Every response is read to the end before its status is looked at, so the
//! connection goes back to the pool whatever the outcome. The captured
//! [`ApiResponse`] is then classified by [`check_response`].

use http::header::CONTENT_LENGTH;
use http::{HeaderMap, StatusCode, Version};
use std::fmt::Write as _;

use crate::error::ClientError;

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Response status code.
    pub status: StatusCode,
    /// HTTP version of the response.
    pub version: Version,
    /// Response headers.
    pub headers: HeaderMap,
    /// The complete response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response with no header.
    #[must_use]
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Reads the whole body of `response`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the body cannot be read.
    pub async fn read(response: reqwest::Response) -> Result<Self, ClientError> {
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| ClientError::Transport(Box::new(err)))?;

        Ok(Self {
            status,
            version,
            headers,
            body: body.to_vec(),
        })
    }

    /// Returns true if the body holds nothing but whitespace.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Renders the response as it appeared on the wire.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = format!("{:?} {}\r\n", self.version, self.status);
        write_headers(&mut out, &self.headers);
        out.push_str("\r\n");
        out.push_str(&String::from_utf8_lossy(&self.body));
        out
    }
}

/// Renders a request as it will appear on the wire.
///
/// Only headers set on `request` are shown, plus `content-length` when there
/// is a body. Headers the transport adds on its own (`user-agent`, ...) are
/// not known yet.
#[must_use]
pub fn dump_request(request: &reqwest::Request) -> String {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut out = format!("{} {} {:?}\r\n", request.method(), target, request.version());
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = write!(out, "Host: {host}:{port}\r\n");
            }
            None => {
                let _ = write!(out, "Host: {host}\r\n");
            }
        }
    }
    write_headers(&mut out, request.headers());
    let body = request.body().and_then(reqwest::Body::as_bytes);
    if let Some(body) = body {
        if !request.headers().contains_key(CONTENT_LENGTH) {
            let _ = write!(out, "{}: {}\r\n", CONTENT_LENGTH, body.len());
        }
    }
    out.push_str("\r\n");
    if let Some(body) = body {
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = write!(out, "{}: {}\r\n", name, String::from_utf8_lossy(value.as_bytes()));
    }
}

/// How a response status is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx.
    Success,
    /// 401: the session token is missing or invalid.
    AuthToken,
    /// 422: a submitted entity was rejected.
    InvalidSignal,
    /// Any other status.
    Unexpected,
}

/// Classifies a response status code.
#[must_use]
pub fn classify_status(status: StatusCode) -> StatusClass {
    match status.as_u16() {
        200..=299 => StatusClass::Success,
        401 => StatusClass::AuthToken,
        422 => StatusClass::InvalidSignal,
        _ => StatusClass::Unexpected,
    }
}

/// Turns an unsuccessful response into the matching error.
///
/// # Errors
///
/// Returns [`ClientError::AuthToken`], [`ClientError::InvalidSignal`] or
/// [`ClientError::Api`] for non-2xx statuses.
pub fn check_response(response: ApiResponse) -> Result<ApiResponse, ClientError> {
    match classify_status(response.status) {
        StatusClass::Success => Ok(response),
        StatusClass::AuthToken => Err(ClientError::AuthToken(response)),
        StatusClass::InvalidSignal => Err(ClientError::InvalidSignal(response)),
        StatusClass::Unexpected => Err(ClientError::Api(response)),
    }
}
