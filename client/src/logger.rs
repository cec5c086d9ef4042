//! Debug logging of HTTP exchanges.

/// Sink for the verbatim request/response trace.
///
/// Closures taking a `&str` implement it, which is handy in tests.
pub trait DebugLogger: Send + Sync {
    /// Receives one formatted message.
    fn debug(&self, message: &str);
}

impl<F> DebugLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn debug(&self, message: &str) {
        self(message);
    }
}

/// Forwards messages to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DebugLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "signal_client::http", "{message}");
    }
}
