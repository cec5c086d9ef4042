//! Ingestion API client.
//!
//! [`Client`] owns everything needed to talk to the ingestion backend: the base
//! URL, the transport, the session token and an optional debug logger. It
//! builds JSON requests, executes them within a [`Context`] and turns the
//! response status into a [`ClientError`] when needed.

use http::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::context::Context;
use crate::error::ClientError;
use crate::logger::DebugLogger;
use crate::response::{check_response, dump_request, ApiResponse};
use crate::service::SignalService;
use crate::transport::Transport;

/// Default ingestion endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ingestion.sqreen.com/";

/// Header carrying the session token.
pub const SESSION_HEADER: HeaderName = HeaderName::from_static("x-session-key");

const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// Client of the ingestion API.
///
/// The client holds no per-call state and can be shared between tasks.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    transport: Arc<dyn Transport>,
    logger: Option<Arc<dyn DebugLogger>>,
    token: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("has_logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client sending requests through `transport`, or through a
    /// new `reqwest::Client` when `None`.
    ///
    /// The base URL is [`DEFAULT_BASE_URL`].
    ///
    /// # Panics
    ///
    /// Never in practice: [`DEFAULT_BASE_URL`] is a valid URL.
    #[must_use]
    pub fn new(transport: Option<Arc<dyn Transport>>, token: impl Into<String>) -> Self {
        let transport = transport
            .unwrap_or_else(|| Arc::new(reqwest::Client::new()) as Arc<dyn Transport>);
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            transport,
            logger: None,
            token: token.into(),
        }
    }

    /// Replaces the base URL, e.g. to target a test server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UrlResolution`] if `base_url` is not a valid URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClientError> {
        self.base_url = Url::parse(base_url).map_err(|source| ClientError::UrlResolution {
            url: base_url.to_string(),
            source,
        })?;
        Ok(self)
    }

    /// Replaces the base URL.
    pub fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Attaches a logger receiving every request and response verbatim.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn DebugLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Attaches or removes the debug logger.
    pub fn set_logger(&mut self, logger: Option<Arc<dyn DebugLogger>>) {
        self.logger = logger;
    }

    /// Returns the signal submission operations of this client.
    #[must_use]
    pub fn signal_service(&self) -> SignalService<'_> {
        SignalService::new(self)
    }

    /// Builds a request for `path`, relative to the base URL.
    ///
    /// A body is encoded as JSON without HTML escaping and followed by a
    /// newline.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UrlResolution`] if `path` cannot be joined to the base URL
    /// - [`ClientError::PayloadEncoding`] if `body` cannot be serialized
    pub fn new_request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<Request, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| ClientError::UrlResolution {
                url: path.to_string(),
                source,
            })?;

        let mut request = Request::new(method, url);

        if let Some(body) = body {
            let mut buf = serde_json::to_vec(body).map_err(ClientError::PayloadEncoding)?;
            buf.push(b'\n');
            request.headers_mut().insert(CONTENT_TYPE, APPLICATION_JSON);
            *request.body_mut() = Some(buf.into());
        }
        request.headers_mut().insert(ACCEPT, APPLICATION_JSON);

        Ok(request)
    }

    /// Executes `request` and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns a context error, a transport error, or the status error matching
    /// the response.
    pub async fn execute<'a>(
        &self,
        ctx: impl Into<Option<&'a Context>>,
        request: Request,
    ) -> Result<(), ClientError> {
        self.send(ctx.into(), request).await.map(|_| ())
    }

    /// Executes `request` and decodes the JSON response body.
    ///
    /// Returns `Ok(None)` when the body is empty.
    ///
    /// # Errors
    ///
    /// Same as [`Client::execute`], plus [`ClientError::Decode`] when a
    /// non-empty body is not valid JSON for `R`.
    pub async fn execute_json<'a, R>(
        &self,
        ctx: impl Into<Option<&'a Context>>,
        request: Request,
    ) -> Result<Option<R>, ClientError>
    where
        R: DeserializeOwned,
    {
        let response = self.send(ctx.into(), request).await?;
        if response.is_body_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&response.body)
            .map(Some)
            .map_err(ClientError::Decode)
    }

    async fn send(
        &self,
        ctx: Option<&Context>,
        mut request: Request,
    ) -> Result<ApiResponse, ClientError> {
        let ctx = ctx.ok_or(ClientError::InvalidContext)?;

        let token = HeaderValue::from_str(&self.token).map_err(ClientError::InvalidToken)?;
        request.headers_mut().insert(SESSION_HEADER, token);

        let method = request.method().clone();
        let url = request.url().clone();

        self.debugf(|| format!("sending request\n{}\n", dump_request(&request)));
        debug!(%method, %url, "sending request");

        let transport = &self.transport;
        let response = ctx
            .run(async move {
                let response = transport
                    .execute(request)
                    .await
                    .map_err(ClientError::Transport)?;
                ApiResponse::read(response).await
            })
            .await?;

        self.debugf(|| format!("received response\n{}\n", response.dump()));
        debug!(%method, %url, status = %response.status, "received response");

        check_response(response)
    }

    fn debugf(&self, message: impl FnOnce() -> String) {
        if let Some(logger) = &self.logger {
            logger.debug(&message());
        }
    }
}
