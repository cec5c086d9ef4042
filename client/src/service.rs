//! Signal submission operations.
//!
//! [`SignalService`] exposes the three ingestion endpoints. Each operation
//! checks its input before anything is sent, then hands the entity to the
//! [`Client`] which does the HTTP exchange. Errors are returned as-is: there is
//! no retry and no partial success.

use reqwest::Method;

use crate::client::Client;
use crate::context::Context;
use crate::error::ClientError;
use crate::models::{Batch, Signal, Trace};

const SIGNALS_PATH: &str = "signals";
const TRACES_PATH: &str = "traces";
const BATCHES_PATH: &str = "batches";

/// Signal submission view of a [`Client`].
///
/// # Example
///
/// ```no_run
/// use signal_client::models::{Signal, SignalPayload};
/// use signal_client::{Client, Context};
///
/// # async fn run() -> Result<(), signal_client::ClientError> {
/// let client = Client::new(None, "my-session-token");
/// let signal = Signal::new("point", "sq.agent.started")
///     .with_payload(SignalPayload::new("agent_started/1", "hello"));
///
/// client
///     .signal_service()
///     .send_signal(&Context::background(), &signal)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SignalService<'c> {
    client: &'c Client,
}

impl<'c> SignalService<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Sends a single signal to `POST /signals`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NilValue`] if `signal` is `None`, otherwise any
    /// error of [`Client::execute`].
    pub async fn send_signal<'a>(
        &self,
        ctx: impl Into<Option<&'a Context>>,
        signal: impl Into<Option<&'a Signal>>,
    ) -> Result<(), ClientError> {
        let signal = signal.into().ok_or(ClientError::NilValue)?;
        let request = self
            .client
            .new_request(Method::POST, SIGNALS_PATH, Some(signal))?;
        self.client.execute(ctx, request).await
    }

    /// Sends a trace to `POST /traces`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NilValue`] if `trace` is `None`,
    /// [`ClientError::EmptyData`] if it holds no signal, otherwise any error of
    /// [`Client::execute`].
    pub async fn send_trace<'a>(
        &self,
        ctx: impl Into<Option<&'a Context>>,
        trace: impl Into<Option<&'a Trace>>,
    ) -> Result<(), ClientError> {
        let trace = trace.into().ok_or(ClientError::NilValue)?;
        if trace.is_empty() {
            return Err(ClientError::EmptyData);
        }
        let request = self
            .client
            .new_request(Method::POST, TRACES_PATH, Some(trace))?;
        self.client.execute(ctx, request).await
    }

    /// Sends signals and traces together to `POST /batches`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NilValue`] if `batch` is `None`,
    /// [`ClientError::EmptyBatch`] if it has no element, otherwise any error of
    /// [`Client::execute`].
    pub async fn send_batch<'a>(
        &self,
        ctx: impl Into<Option<&'a Context>>,
        batch: impl Into<Option<&'a Batch>>,
    ) -> Result<(), ClientError> {
        let batch = batch.into().ok_or(ClientError::NilValue)?;
        if batch.is_empty() {
            return Err(ClientError::EmptyBatch);
        }
        let request = self
            .client
            .new_request(Method::POST, BATCHES_PATH, Some(batch))?;
        self.client.execute(ctx, request).await
    }
}
