use clap::{Args, Parser, Subcommand};

use crate::sender::DEFAULT_EVENTS_URL;

/// pagerduty-alert – trigger a PagerDuty incident from a GitHub Actions run
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the alert from the current run and send it
    Send(SendArgs),
    /// Print build information
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Action inputs. Each flag falls back to the `INPUT_*` variable the runner
/// sets for the matching `with:` key.
#[derive(Args, Debug, Default, Clone)]
pub struct SendArgs {
    /// PagerDuty Events API v2 integration (routing) key
    #[arg(long, env = "INPUT_PAGERDUTY-INTEGRATION-KEY", hide_env_values = true)]
    pub integration_key: Option<String>,

    /// Incident severity (critical, error, warning, info)
    #[arg(long, env = "INPUT_INCIDENT-SEVERITY")]
    pub severity: Option<String>,

    /// Incident summary, replaces the generated one
    #[arg(long, env = "INPUT_INCIDENT-SUMMARY")]
    pub summary: Option<String>,

    /// Region recorded in custom_details
    #[arg(long, env = "INPUT_INCIDENT-REGION")]
    pub region: Option<String>,

    /// Environment recorded in custom_details
    #[arg(long, env = "INPUT_INCIDENT-ENVIRONMENT")]
    pub environment: Option<String>,

    /// Key PagerDuty uses to group repeated alerts into one incident
    #[arg(long, env = "INPUT_PAGERDUTY-DEDUP-KEY")]
    pub dedup_key: Option<String>,

    /// Events API URL
    #[arg(long, env = "PAGERDUTY_EVENTS_URL", default_value = DEFAULT_EVENTS_URL)]
    pub endpoint: String,

    /// Print the alert instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}
