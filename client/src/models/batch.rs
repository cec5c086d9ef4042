//! Batch data model.
//!
//! A batch sends signals and traces together in a single request. Only the
//! types listed in [`BatchItem`] can be batched.

use serde::{Deserialize, Serialize};

use super::signal::Signal;
use super::trace::Trace;

/// An element of a [`Batch`].
///
/// Encoded as the bare signal or trace object. On decoding, objects carrying a
/// `data` array are read back as traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchItem {
    /// A trace of signals.
    Trace(Trace),
    /// A single signal.
    Signal(Signal),
}

impl BatchItem {
    /// Returns the signal if this item is a single signal.
    #[must_use]
    pub fn as_signal(&self) -> Option<&Signal> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::Trace(_) => None,
        }
    }

    /// Returns the trace if this item is a trace.
    #[must_use]
    pub fn as_trace(&self) -> Option<&Trace> {
        match self {
            Self::Signal(_) => None,
            Self::Trace(trace) => Some(trace),
        }
    }
}

impl From<Signal> for BatchItem {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}

impl From<Trace> for BatchItem {
    fn from(trace: Trace) -> Self {
        Self::Trace(trace)
    }
}

/// An ordered list of signals and traces, encoded as a JSON array.
///
/// # Example
///
/// ```
/// use signal_client::models::{Batch, Signal, Trace};
///
/// let batch = Batch::new()
///     .with(Signal::new("point", "login"))
///     .with(Trace::from_signals(vec![Signal::new("point", "query")]));
///
/// assert_eq!(batch.len(), 2);
/// assert!(batch.items()[1].as_trace().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch(Vec<BatchItem>);

impl Batch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a signal or a trace.
    pub fn push(&mut self, item: impl Into<BatchItem>) {
        self.0.push(item.into());
    }

    /// Appends a signal or a trace, builder style.
    #[must_use]
    pub fn with(mut self, item: impl Into<BatchItem>) -> Self {
        self.push(item);
        self
    }

    /// Returns the batch elements in order.
    #[must_use]
    pub fn items(&self) -> &[BatchItem] {
        &self.0
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the batch has no element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, BatchItem> {
        self.0.iter()
    }
}

impl From<Vec<BatchItem>> for Batch {
    fn from(items: Vec<BatchItem>) -> Self {
        Self(items)
    }
}

impl FromIterator<BatchItem> for Batch {
    fn from_iter<I: IntoIterator<Item = BatchItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<BatchItem> for Batch {
    fn extend<I: IntoIterator<Item = BatchItem>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Batch {
    type Item = BatchItem;
    type IntoIter = std::vec::IntoIter<BatchItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a BatchItem;
    type IntoIter = std::slice::Iter<'a, BatchItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
