use std::path::PathBuf;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pagerduty_alert::action::{deliver, record_outputs, Outcome};
use pagerduty_alert::build_info::BuildInfo;
use pagerduty_alert::cli::{Cli, Commands};
use pagerduty_alert::config::Inputs;
use pagerduty_alert::context::RunContext;
use pagerduty_alert::payload::AlertEvent;
use pagerduty_alert::sender::AlertSender;
use pagerduty_alert::workflow_commands::{error_command, mask_command};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rt = Runtime::new()?;
    rt.block_on(async {
        match cli.command {
            Commands::Send(args) => {
                let inputs = Inputs::from_args(&args);
                if let Some(key) = &inputs.integration_key {
                    println!("{}", mask_command(key));
                }

                let ctx = RunContext::from_env();
                let event = AlertEvent::build(&ctx, &inputs, chrono::Utc::now());

                if args.dry_run {
                    println!("{}", serde_json::to_string_pretty(&event.redacted())?);
                    return Ok(());
                }

                let sender = AlertSender::new(args.endpoint);
                let outcome = deliver(&sender, &event).await;

                // Outputs are best-effort once PagerDuty has the event.
                let github_output = std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from);
                if let Err(e) = record_outputs(&outcome, github_output.as_deref()) {
                    warn!(error = %format!("{e:#}"), "Could not write step outputs");
                }

                // Exit code: 0 = sent, 1 = step failed
                if let Outcome::SentFailed(message) = &outcome {
                    println!("{}", error_command(message));
                    std::process::exit(1);
                }
            }
            Commands::Version { json } => {
                let info = BuildInfo::current();
                if json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    println!("{info}");
                }
            }
        }
        Ok(())
    })
}
