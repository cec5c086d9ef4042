//! Signal data model.
//!
//! A [`Signal`] is the atomic telemetry unit reported by an agent. It carries an
//! opaque application payload tagged with the schema naming its shape.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Kind tag of a signal.
///
/// The ingestion backend knows `point` and `metric`, but the wire format is an
/// open string so agents can report newer kinds without a client upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalType(Cow<'static, str>);

impl SignalType {
    /// A point-in-time event.
    pub const POINT: Self = Self(Cow::Borrowed("point"));
    /// An aggregated metric.
    pub const METRIC: Self = Self(Cow::Borrowed("metric"));

    /// Creates a signal type from an arbitrary kind string.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self(Cow::Owned(kind.into()))
    }

    /// Returns the wire representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SignalType {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for SignalType {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

/// An opaque payload together with the identifier of its schema.
///
/// The schema string is forwarded untouched; the client never checks it
/// against a registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    /// Identifier of the payload shape and version.
    #[serde(rename = "payload_schema")]
    pub schema: String,
    /// The application-defined payload.
    pub payload: serde_json::Value,
}

impl SignalPayload {
    /// Creates a payload from an already-built JSON value.
    #[must_use]
    pub fn new(schema: impl Into<String>, payload: impl Into<serde_json::Value>) -> Self {
        Self {
            schema: schema.into(),
            payload: payload.into(),
        }
    }

    /// Creates a payload by serializing any `Serialize` value.
    ///
    /// # Errors
    ///
    /// Returns an error if `payload` cannot be represented as JSON, for example
    /// a map with non-string keys.
    pub fn from_serializable<T>(
        schema: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(Self {
            schema: schema.into(),
            payload: serde_json::to_value(payload)?,
        })
    }
}

/// A single frame of a captured stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StackFrame {
    /// Function or method name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Line number within `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Where in the instrumented program a signal was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Stack frames, innermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<StackFrame>,
}

/// A telemetry signal.
///
/// # Example
///
/// ```
/// use signal_client::models::{Signal, SignalPayload, SignalType};
///
/// let signal = Signal::new(SignalType::POINT, "sq.agent.exception")
///     .with_source("sqreen:agent:rust")
///     .with_payload(SignalPayload::new("exception/2020-01-01", "boom"));
///
/// let json = serde_json::to_value(&signal).unwrap();
/// assert_eq!(json["signal_name"], "sq.agent.exception");
/// assert_eq!(json["payload_schema"], "exception/2020-01-01");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Signal {
    /// Payload and schema, serialized inline with the other fields.
    #[serde(flatten)]
    pub payload: Option<SignalPayload>,

    /// The kind of signal.
    #[serde(rename = "type", default)]
    pub signal_type: SignalType,

    /// Human-readable signal name.
    #[serde(rename = "signal_name", default)]
    pub name: String,

    /// The component that emitted the signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Who triggered the signal (user, IP address, ...).
    ///
    /// A JSON `null` is never sent: it reads back as `None`.
    #[serde(default, skip_serializing_if = "is_none_or_null")]
    pub actor: Option<serde_json::Value>,

    /// Execution context the signal was emitted in.
    #[serde(default, skip_serializing_if = "is_none_or_null")]
    pub context: Option<serde_json::Value>,

    /// What caused the signal.
    #[serde(default, skip_serializing_if = "is_none_or_null")]
    pub trigger: Option<serde_json::Value>,

    /// Code location of the signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

fn is_none_or_null(value: &Option<serde_json::Value>) -> bool {
    matches!(value, None | Some(serde_json::Value::Null))
}

fn non_null(value: serde_json::Value) -> Option<serde_json::Value> {
    (!value.is_null()).then_some(value)
}

impl Signal {
    /// Creates a signal with the given kind and name and no payload.
    #[must_use]
    pub fn new(signal_type: impl Into<SignalType>, name: impl Into<String>) -> Self {
        Self {
            signal_type: signal_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: SignalPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Sets the emitting component.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the actor data.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<serde_json::Value>) -> Self {
        self.actor = non_null(actor.into());
        self
    }

    /// Sets the context data.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<serde_json::Value>) -> Self {
        self.context = non_null(context.into());
        self
    }

    /// Sets the trigger data.
    #[must_use]
    pub fn with_trigger(mut self, trigger: impl Into<serde_json::Value>) -> Self {
        self.trigger = non_null(trigger.into());
        self
    }

    /// Sets the code location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the payload schema, if a payload is attached.
    #[must_use]
    pub fn payload_schema(&self) -> Option<&str> {
        self.payload.as_ref().map(|p| p.schema.as_str())
    }
}
