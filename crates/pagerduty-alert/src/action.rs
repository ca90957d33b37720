use std::path::Path;

use anyhow::Result;
use tracing::{debug, error};

use crate::payload::AlertEvent;
use crate::sender::{AlertSender, Delivery};
use crate::workflow_commands::append_output;

/// Result of the one delivery attempt an invocation makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    SentOk(Delivery),
    /// Message to report as the step failure.
    SentFailed(String),
}

/// Send `event` and fold every error into a failure message.
pub async fn deliver(sender: &AlertSender, event: &AlertEvent) -> Outcome {
    match sender.send(event).await {
        Ok(delivery) => Outcome::SentOk(delivery),
        Err(e) => {
            error!(endpoint = %sender.endpoint(), error = %e, "PagerDuty alert not delivered");
            Outcome::SentFailed(e.to_string())
        }
    }
}

/// Expose the incident's dedup key to later steps.
pub fn record_outputs(outcome: &Outcome, github_output: Option<&Path>) -> Result<()> {
    let (Outcome::SentOk(delivery), Some(path)) = (outcome, github_output) else {
        return Ok(());
    };
    if let Some(key) = &delivery.dedup_key {
        debug!(path = %path.display(), "Writing dedup-key output");
        append_output(path, "dedup-key", key)?;
    }
    Ok(())
}
