//! QR code node command-line harness.
//!
//! Binary name: `qrnode`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the command
//! handler. Each command is a single synchronous node invocation.

mod cli;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,qrnode_core=debug",
        _ => "trace",
    };
    qrnode_observe::tracing_setup::init_tracing(cli.otel, filter)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli);
    qrnode_observe::tracing_setup::shutdown_tracing();
    result
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Process { input, resume } => cli::node::process(input, resume, cli.json, cli.quiet),
        Commands::Payload { input } => cli::node::payload(input, cli.json, cli.quiet),
        Commands::Validate { config } => cli::node::validate(&config, cli.json, cli.quiet),
        Commands::Schema => cli::schema::show_schema(cli.json),
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "qrnode", &mut std::io::stdout());
            Ok(())
        }
    }
}
