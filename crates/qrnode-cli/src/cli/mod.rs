//! CLI command definitions and dispatch for the `qrnode` binary.
//!
//! Uses clap derive macros for argument parsing. Every command that runs the
//! node takes a configuration file plus optional shared state.

pub mod node;
pub mod schema;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Run and inspect the QR code authentication node locally.
#[derive(Parser)]
#[command(name = "qrnode", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Invoke the node once and print the resulting action.
    Process {
        #[command(flatten)]
        input: NodeInput,

        /// Simulate a resumed request whose script output carried this message.
        #[arg(long)]
        resume: Option<String>,
    },

    /// Print the text the QR code would encode.
    Payload {
        #[command(flatten)]
        input: NodeInput,
    },

    /// Validate a node configuration file.
    Validate {
        /// Node configuration (.toml, .yaml, .yml or .json).
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Show the node's configuration schema.
    Schema,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Configuration and shared state for one node invocation.
#[derive(Args)]
pub struct NodeInput {
    /// Node configuration (.toml, .yaml, .yml or .json).
    #[arg(short, long)]
    pub config: PathBuf,

    /// Shared state as a JSON object file.
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Set a shared-state entry (value is JSON, or a plain string). Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub entries: Vec<(String, serde_json::Value)>,
}

/// Parse `KEY=VALUE`, reading VALUE as JSON and falling back to a string.
fn parse_key_value(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err("key must not be empty".to_string());
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
