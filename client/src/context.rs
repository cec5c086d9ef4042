//! Request context.
//!
//! Every call to the ingestion backend is bound to a [`Context`] that can carry
//! a deadline and can be cancelled from elsewhere. The call resolves as soon
//! as the exchange completes, the deadline passes, or the context is
//! cancelled, whichever comes first. Dropping the in-flight exchange aborts it
//! in the transport.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Deadline and cancellation scope of a call.
///
/// # Example
///
/// ```
/// use signal_client::Context;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let ctx = Context::with_timeout(Duration::from_secs(5));
/// assert!(ctx.deadline().is_some());
///
/// ctx.cancel();
/// assert!(ctx.err().is_some());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl Context {
    /// A context that never expires and is never cancelled unless asked to.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context expiring `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancellation: CancellationToken::new(),
        }
    }

    /// A context expiring at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancellation: CancellationToken::new(),
        }
    }

    /// Derives a context cancelled with this one and expiring no later than
    /// `timeout` from now.
    #[must_use]
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(parent), Some(child)) => Some(parent.min(child)),
            (parent, child) => parent.or(child),
        };
        Self {
            deadline,
            cancellation: self.cancellation.child_token(),
        }
    }

    /// Uses `token` to cancel calls bound to this context.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the token cancelling this context.
    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Cancels this context and its children.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns why the context is done, or `None` while it is still live.
    #[must_use]
    pub fn err(&self) -> Option<ClientError> {
        if self.cancellation.is_cancelled() {
            return Some(ClientError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(ClientError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Runs `future` within the context.
    ///
    /// A context that is already done fails without polling `future`.
    pub(crate) async fn run<F, T>(&self, future: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        match self.deadline {
            Some(deadline) => tokio::select! {
                () = self.cancellation.cancelled() => Err(ClientError::Cancelled),
                result = tokio::time::timeout_at(deadline, future) => {
                    result.unwrap_or(Err(ClientError::DeadlineExceeded))
                }
            },
            None => tokio::select! {
                () = self.cancellation.cancelled() => Err(ClientError::Cancelled),
                result = future => result,
            },
        }
    }
}
