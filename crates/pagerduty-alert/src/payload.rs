//! PagerDuty Events API v2 `trigger` event.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::warn;

use crate::config::Inputs;
use crate::context::RunContext;

pub const SOURCE: &str = "GitHub Actions";
pub const NO_RELATED_COMMITS: &str = "No related commits";

/// Severity levels accepted by the Events API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub fn is_known(value: &str) -> bool {
        [Self::Critical, Self::Error, Self::Warning, Self::Info]
            .iter()
            .any(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Trigger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertEvent {
    pub payload: AlertPayload,
    pub routing_key: String,
    pub event_action: EventAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    pub summary: String,
    pub timestamp: String,
    pub source: String,
    pub severity: String,
    pub custom_details: CustomDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomDetails {
    pub run_details: String,
    pub related_commits: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

type Setter = fn(&mut AlertEvent, &str);

/// Optional inputs paired with the field each one replaces.
fn overrides(inputs: &Inputs) -> [(Option<&str>, Setter); 5] {
    [
        (inputs.severity.as_deref(), |e: &mut AlertEvent, v: &str| {
            e.payload.severity = v.to_string();
        }),
        (inputs.summary.as_deref(), |e: &mut AlertEvent, v: &str| {
            e.payload.summary = v.to_string();
        }),
        (inputs.region.as_deref(), |e: &mut AlertEvent, v: &str| {
            e.payload.custom_details.region = Some(v.to_string());
        }),
        (inputs.environment.as_deref(), |e: &mut AlertEvent, v: &str| {
            e.payload.custom_details.environment = Some(v.to_string());
        }),
        (inputs.dedup_key.as_deref(), |e: &mut AlertEvent, v: &str| {
            e.dedup_key = Some(v.to_string());
        }),
    ]
}

impl AlertEvent {
    /// Assemble the event for `ctx`. Pure: the clock is passed in.
    pub fn build(ctx: &RunContext, inputs: &Inputs, now: DateTime<Utc>) -> Self {
        let mut event = Self {
            payload: AlertPayload {
                summary: default_summary(ctx),
                timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                source: SOURCE.to_string(),
                severity: Severity::Critical.as_str().to_string(),
                custom_details: CustomDetails {
                    run_details: run_url(ctx),
                    related_commits: related_commits(ctx),
                    region: None,
                    environment: None,
                },
            },
            routing_key: inputs.integration_key.clone().unwrap_or_default(),
            event_action: EventAction::Trigger,
            dedup_key: None,
        };

        for (value, set) in overrides(inputs) {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                set(&mut event, v);
            }
        }

        if !Severity::is_known(&event.payload.severity) {
            warn!(
                severity = %event.payload.severity,
                "Severity is not one of critical, error, warning, info; PagerDuty may reject it"
            );
        }

        event
    }

    /// Copy suitable for printing, with the routing key hidden.
    pub fn redacted(&self) -> Self {
        Self {
            routing_key: "***".to_string(),
            ..self.clone()
        }
    }
}

pub fn default_summary(ctx: &RunContext) -> String {
    format!(
        "{}: Error in \"{}\" run by @{}",
        ctx.repo, ctx.workflow, ctx.actor
    )
}

pub fn run_url(ctx: &RunContext) -> String {
    format!(
        "https://github.com/{}/{}/actions/runs/{}",
        ctx.owner, ctx.repo, ctx.run_id
    )
}

pub fn related_commits(ctx: &RunContext) -> String {
    match ctx.commits.as_deref() {
        Some(commits) if !commits.is_empty() => commits
            .iter()
            .map(|c| format!("{}: {}", c.message, c.url))
            .collect::<Vec<_>>()
            .join(", "),
        _ => NO_RELATED_COMMITS.to_string(),
    }
}
