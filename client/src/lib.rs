//! Signal Client Library
//!
//! This crate is a client of the signal ingestion API. It sends signals,
//! traces and batches of both to the ingestion backend over HTTP.
//!
//! # Modules
//!
//! - [`models`] - Signals, traces, batches and the metric payload builder
//! - [`client`] - Request building and execution
//! - [`service`] - The three submission operations
//! - [`config`] - Environment based configuration
//!
//! # Example
//!
//! ```
//! use signal_client::models::{Batch, Signal, SignalPayload, Trace};
//!
//! let started = Signal::new("point", "sq.agent.started")
//!     .with_source("my-agent")
//!     .with_payload(SignalPayload::new("agent_started/1", "hello"));
//!
//! let trace = Trace::from_signals(vec![started.clone()]);
//! let batch = Batch::new().with(started).with(trace);
//!
//! assert_eq!(batch.len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod models;
pub mod response;
pub mod service;
pub mod transport;

pub use client::{Client, DEFAULT_BASE_URL, SESSION_HEADER};
pub use config::{ClientConfig, ConfigError};
pub use context::Context;
pub use error::ClientError;
pub use logger::{DebugLogger, TracingLogger};
pub use response::{check_response, classify_status, ApiResponse, StatusClass};
pub use service::SignalService;
pub use transport::{BoxError, Transport};

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
