//! Read-only view of the GitHub Actions run that invoked us.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

/// Metadata about the triggering run. Every field degrades to an empty value
/// when the runner did not provide it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub workflow: String,
    pub actor: String,
    pub run_id: String,
    /// `None` when the event carried no `commits` array.
    pub commits: Option<Vec<Commit>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    commits: Option<Vec<Commit>>,
}

impl RunContext {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let repository = var("GITHUB_REPOSITORY");
        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) => (owner.to_string(), repo.to_string()),
            None => (String::new(), repository),
        };

        let commits = match lookup("GITHUB_EVENT_PATH") {
            Some(path) if !path.is_empty() => read_commits(Path::new(&path)),
            _ => {
                debug!("GITHUB_EVENT_PATH not set, no commit information");
                None
            }
        };

        Self {
            owner,
            repo,
            workflow: var("GITHUB_WORKFLOW"),
            actor: var("GITHUB_ACTOR"),
            run_id: var("GITHUB_RUN_ID"),
            commits,
        }
    }
}

fn read_commits(path: &Path) -> Option<Vec<Commit>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read event payload");
            return None;
        }
    };
    match serde_json::from_str::<EventPayload>(&contents) {
        Ok(event) => event.commits,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not parse event payload");
            None
        }
    }
}
