//! Trace data model.
//!
//! A trace groups related signals. Fields common to the whole group are set on
//! the trace root and the individual signals go in `data`.

use serde::{Deserialize, Serialize};

use super::signal::Signal;

/// A set of signals sharing the context of a root signal.
///
/// The root fields are serialized inline next to `data`; the children are
/// encoded on their own and never merged with the root.
///
/// # Example
///
/// ```
/// use signal_client::models::{Signal, SignalPayload, Trace};
///
/// let trace = Trace::new(Signal::new("point", "http request"))
///     .with_signal(Signal::new("point", "sql query"))
///     .with_signal(Signal::new("point", "cache miss"));
///
/// assert_eq!(trace.len(), 2);
/// let json = serde_json::to_value(&trace).unwrap();
/// assert_eq!(json["signal_name"], "http request");
/// assert_eq!(json["data"][1]["signal_name"], "cache miss");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    /// The root signal holding the shared fields.
    #[serde(flatten)]
    pub signal: Signal,

    /// The signals of the trace, in order.
    pub data: Vec<Signal>,
}

impl Trace {
    /// Creates an empty trace with the given root.
    #[must_use]
    pub fn new(root: Signal) -> Self {
        Self {
            signal: root,
            data: Vec::new(),
        }
    }

    /// Creates a trace with a default root from a list of signals.
    #[must_use]
    pub fn from_signals(data: Vec<Signal>) -> Self {
        Self {
            signal: Signal::default(),
            data,
        }
    }

    /// Appends a signal to the trace.
    #[must_use]
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.data.push(signal);
        self
    }

    /// Returns the number of signals in this trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the trace holds no signal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
