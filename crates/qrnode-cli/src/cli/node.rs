//! Node commands: process, payload and validate.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qrnode_core::config::{load_config_file, load_shared_state_file};
use qrnode_core::node::{Node, QrCodeNode};
use qrnode_types::config::QrCodeConfig;
use qrnode_types::tree::{Action, Callback, SharedState, TreeContext};

use super::NodeInput;

/// Load the node config and assemble shared state from `--state` and `--set`.
///
/// `--set` entries override keys from the state file.
fn load_input(input: NodeInput) -> Result<(QrCodeConfig, SharedState)> {
    let config = load_config(&input.config)?;

    let mut state = match &input.state {
        Some(path) => load_shared_state_file(path)
            .with_context(|| format!("Failed to load shared state from {}", path.display()))?,
        None => SharedState::new(),
    };
    for (key, value) in input.entries {
        state.insert(key, value);
    }
    tracing::debug!(keys = state.len(), "assembled shared state");

    Ok((config, state))
}

fn load_config(path: &Path) -> Result<QrCodeConfig> {
    load_config_file(path)
        .with_context(|| format!("Failed to load node config from {}", path.display()))
}

/// Invoke the node once and print the action it returns.
pub fn process(input: NodeInput, resume: Option<String>, json: bool, quiet: bool) -> Result<()> {
    let (config, state) = load_input(input)?;
    let node = QrCodeNode::new(config);

    let mut ctx = TreeContext::new(state);
    if let Some(message) = resume {
        ctx = ctx.with_callback(Callback::script(message));
    }

    let action = node.process(&ctx).context("Node invocation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&action)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!();
    match &action {
        Action::Advance { outcome } => {
            println!(
                "  {} Advance through outcome '{}'",
                style("ok").green(),
                style(outcome).cyan()
            );
        }
        Action::Send { callbacks } => {
            println!(
                "  {} Send {} callback(s) and wait for the user agent",
                style("->").yellow(),
                callbacks.len()
            );
            for callback in callbacks {
                let (title, body) = describe_callback(callback);
                println!();
                println!("  {}", style(format!("── {title} ──")).dim());
                println!("{body}");
            }
        }
    }
    println!();

    Ok(())
}

/// Section title and printable body of a sent callback.
fn describe_callback(callback: &Callback) -> (&'static str, String) {
    match callback {
        Callback::ScriptTextOutput { message } => ("Script", message.clone()),
        Callback::TextOutput { message } => ("Text", message.clone()),
        Callback::HiddenValue { id, value } => ("Hidden value", format!("{id} = {value}")),
    }
}

/// Print the payload the node would encode, without rendering it.
///
/// With `--quiet` the payload is still built, so undefined references are
/// reported, but nothing is printed.
pub fn payload(input: NodeInput, json: bool, quiet: bool) -> Result<()> {
    let (config, state) = load_input(input)?;
    let node = QrCodeNode::new(config);
    let payload = node.payload(&state).context("Failed to build payload")?;

    if json {
        let result = serde_json::json!({
            "mode": node.config().operation_mode,
            "payload": payload,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !quiet {
        println!("{payload}");
    }
    Ok(())
}

/// Validate a config file and summarize what it will read from shared state.
pub fn validate(path: &Path, json: bool, quiet: bool) -> Result<()> {
    let config = load_config(path)?;
    let node = QrCodeNode::new(config);
    let references = node.source().references();

    if json {
        let result = serde_json::json!({
            "valid": true,
            "config": node.config(),
            "references": references,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!();
    println!(
        "  {} {} is valid",
        style("ok").green(),
        style(path.display()).cyan()
    );
    println!("  Mode:       {}", style(node.config().operation_mode).bold());
    if references.is_empty() {
        println!("  References: {}", style("none").dim());
    } else {
        println!("  References: {}", references.join(", "));
    }
    println!();
    Ok(())
}
