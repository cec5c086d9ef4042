//! Metric signal payloads.
//!
//! Agents aggregate measurements locally and report them periodically as
//! `metric` signals. This module builds those signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::signal::{Signal, SignalPayload, SignalType};

/// Schema identifier of metric payloads.
pub const METRIC_PAYLOAD_SCHEMA: &str = "metric/2020-01-01T00:00:00.000Z";

/// Aggregation applied to the reported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Values are sums over the capture interval.
    Sum,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
        }
    }
}

/// A single aggregated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValueEntry {
    /// The aggregation key.
    pub key: String,
    /// The aggregated value.
    pub value: i64,
}

/// The payload of a metric signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSignalPayload {
    /// Always `"metric"`. The ingestion backend reads this field capitalized.
    #[serde(rename = "Type")]
    pub payload_type: String,
    /// Length of the capture interval, in whole seconds.
    #[serde(rename = "capture_interval_s")]
    pub capture_interval_secs: u64,
    /// Start of the capture interval.
    pub date_started: DateTime<Utc>,
    /// End of the capture interval.
    pub date_ended: DateTime<Utc>,
    /// How values were aggregated.
    pub kind: MetricKind,
    /// The aggregated values.
    pub values: Vec<MetricValueEntry>,
}

impl MetricSignalPayload {
    /// Creates a metric payload.
    ///
    /// Value entries keep the order of `values`.
    #[must_use]
    pub fn new<K>(
        started: DateTime<Utc>,
        ended: DateTime<Utc>,
        interval: Duration,
        kind: MetricKind,
        values: impl IntoIterator<Item = (K, i64)>,
    ) -> Self
    where
        K: Into<String>,
    {
        Self {
            payload_type: "metric".to_string(),
            capture_interval_secs: interval.as_secs(),
            date_started: started,
            date_ended: ended,
            kind,
            values: values
                .into_iter()
                .map(|(key, value)| MetricValueEntry {
                    key: key.into(),
                    value,
                })
                .collect(),
        }
    }

    /// Wraps the payload with the metric schema identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be converted to JSON.
    pub fn into_signal_payload(self) -> Result<SignalPayload, serde_json::Error> {
        SignalPayload::from_serializable(METRIC_PAYLOAD_SCHEMA, &self)
    }
}

/// Builds a `metric` signal reporting summed values.
///
/// # Example
///
/// ```
/// use chrono::{Duration as ChronoDuration, Utc};
/// use signal_client::models::new_sum_metric;
/// use std::time::Duration;
///
/// let ended = Utc::now();
/// let started = ended - ChronoDuration::seconds(60);
/// let signal = new_sum_metric(
///     "sq.agent.metric.whitelisted",
///     "sqreen:agent",
///     started,
///     ended,
///     Duration::from_secs(60),
///     [("path=/admin", 3)],
/// )
/// .unwrap();
///
/// assert_eq!(signal.signal_type.as_str(), "metric");
/// ```
///
/// # Errors
///
/// Returns an error if the payload cannot be converted to JSON.
pub fn new_sum_metric<K>(
    name: impl Into<String>,
    source: impl Into<String>,
    started: DateTime<Utc>,
    ended: DateTime<Utc>,
    interval: Duration,
    values: impl IntoIterator<Item = (K, i64)>,
) -> Result<Signal, serde_json::Error>
where
    K: Into<String>,
{
    let payload =
        MetricSignalPayload::new(started, ended, interval, MetricKind::Sum, values)
            .into_signal_payload()?;

    Ok(Signal::new(SignalType::METRIC, name)
        .with_source(source)
        .with_payload(payload))
}
