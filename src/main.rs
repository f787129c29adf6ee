//! Redeploy CLI
//!
//! Usage: redeploy --repo <PATH> --service <UNIT> --binary-name <NAME> [OPTIONS]

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use redeploy::presentation::{cli::Cli, factory, output};
use redeploy::{config, DeployOutcome};

/// Exit status after an interrupt
const INTERRUPTED: i32 = 130;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    if let Err(err) = ctrlc::set_handler(|| std::process::exit(INTERRUPTED)) {
        warn!(error = %err, "could not install interrupt handler");
    }

    let json = cli.json;
    if let Err(err) = run(cli) {
        output::print_error(&err, json);
        std::process::exit(output::exit_code(&err));
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<DeployOutcome> {
    let (file, warnings) = config::resolve(cli.config.as_deref())?;
    output::print_config_warnings(&warnings, cli.json);
    let file = config::with_env_overrides(file);

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let sink = output::create_event_sink(cli.json);
    let run_config = cli.into_run_config(file, dirs::home_dir(), &cwd)?;
    debug!(?run_config, "resolved configuration");

    let outcome = factory::create_deploy_use_case().execute_with_events(&run_config, sink.as_ref())?;
    Ok(outcome)
}
