//! Signal CLI
//!
//! Command-line interface for submitting signals to the ingestion API.
//!
//! # Usage
//!
//! ```bash
//! signal-cli --help
//! signal-cli signal --type point --name sq.agent.started --schema agent_started/1 --payload '"hello"'
//! signal-cli trace trace.json
//! cat batch.json | signal-cli --debug batch -
//! ```

#![deny(unsafe_code)]

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use signal_client::config::{ENV_INGESTION_URL, ENV_TIMEOUT_SECS, ENV_TOKEN};
use signal_client::models::{Batch, Signal, SignalPayload, Trace};
use signal_client::{ClientConfig, Context, TracingLogger};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Signal CLI - Submit signals, traces and batches to the ingestion API
#[derive(Parser)]
#[command(name = "signal-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ingestion API base URL
    #[arg(short, long, env = ENV_INGESTION_URL)]
    url: Option<String>,

    /// Session token
    #[arg(short, long, env = ENV_TOKEN, hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS)]
    timeout: Option<u64>,

    /// Print every HTTP request and response
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single signal built from flags
    Signal {
        /// Signal kind, e.g. `point` or `metric`
        #[arg(long = "type")]
        signal_type: String,

        /// Signal name
        #[arg(long)]
        name: String,

        /// Emitting component
        #[arg(long)]
        source: Option<String>,

        /// Payload schema identifier
        #[arg(long)]
        schema: String,

        /// Payload as a JSON document
        #[arg(long)]
        payload: String,
    },

    /// Send a trace read from a JSON file, or `-` for stdin
    Trace {
        /// Input file
        input: PathBuf,
    },

    /// Send a batch read from a JSON file, or `-` for stdin
    Batch {
        /// Input file
        input: PathBuf,
    },
}

impl Cli {
    /// Resolves the client configuration, flags taking precedence over the
    /// environment.
    fn config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::from_lookup(|key| match key {
            ENV_INGESTION_URL => self.url.clone(),
            ENV_TOKEN => self.token.clone(),
            ENV_TIMEOUT_SECS => self.timeout.map(|secs| secs.to_string()),
            _ => None,
        })?;
        Ok(config)
    }
}

fn build_signal(
    signal_type: &str,
    name: &str,
    source: Option<&str>,
    schema: &str,
    payload: &str,
) -> Result<Signal> {
    let payload: serde_json::Value =
        serde_json::from_str(payload).context("payload is not a valid JSON document")?;

    let mut signal =
        Signal::new(signal_type, name).with_payload(SignalPayload::new(schema, payload));
    if let Some(source) = source {
        signal = signal.with_source(source);
    }
    Ok(signal)
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

fn parse_trace(document: &str) -> Result<Trace> {
    serde_json::from_str(document).context("input is not a valid trace")
}

fn parse_batch(document: &str) -> Result<Batch> {
    serde_json::from_str(document).context("input is not a valid batch")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = cli.config()?;
    let timeout: Duration = config.timeout;
    let mut client = config.build()?;
    if cli.debug {
        client.set_logger(Some(Arc::new(TracingLogger)));
    }

    let ctx = Context::with_timeout(timeout);
    let service = client.signal_service();

    match &cli.command {
        Commands::Signal {
            signal_type,
            name,
            source,
            schema,
            payload,
        } => {
            let signal = build_signal(signal_type, name, source.as_deref(), schema, payload)?;
            service.send_signal(&ctx, &signal).await?;
            info!(name = %signal.name, "signal sent");
        }
        Commands::Trace { input } => {
            let trace = parse_trace(&read_input(input)?)?;
            service.send_trace(&ctx, &trace).await?;
            info!(signals = trace.len(), "trace sent");
        }
        Commands::Batch { input } => {
            let batch = parse_batch(&read_input(input)?)?;
            service.send_batch(&ctx, &batch).await?;
            info!(items = batch.len(), "batch sent");
        }
    }

    Ok(())
}
