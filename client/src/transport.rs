//! HTTP transport abstraction.
//!
//! The client does not talk to the network itself: it hands fully-built
//! requests to a [`Transport`]. Connection pooling, TLS and timeouts are the
//! transport's business. `reqwest::Client` is the default implementation and
//! tests substitute recording fakes.

use async_trait::async_trait;
use reqwest::{Request, Response};

/// Boxed error returned by transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Something that can execute an HTTP request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response head with an unread body.
    async fn execute(&self, request: Request) -> Result<Response, BoxError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: Request) -> Result<Response, BoxError> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(Into::into)
    }
}
