//! Data models for telemetry signals.
//!
//! This module contains the entities sent to the ingestion backend: signals,
//! traces, batches and the metric payload builder.

pub mod batch;
pub mod metric;
pub mod signal;
pub mod trace;

pub use batch::{Batch, BatchItem};
pub use metric::{
    new_sum_metric, MetricKind, MetricSignalPayload, MetricValueEntry, METRIC_PAYLOAD_SCHEMA,
};
pub use signal::{Location, Signal, SignalPayload, SignalType, StackFrame};
pub use trace::Trace;
