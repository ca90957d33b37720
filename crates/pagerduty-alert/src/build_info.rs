use std::fmt;

use serde::Serialize;

/// Version and provenance stamped in at compile time.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub build_date: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GIT_SHA").unwrap_or("unknown"),
            build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (commit: {}, built: {})",
            env!("CARGO_PKG_NAME"),
            self.version,
            self.commit,
            self.build_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_json_agree() {
        let info = BuildInfo {
            version: "1.2.3",
            commit: "abc123",
            build_date: "2024-03-01",
        };
        assert_eq!(
            info.to_string(),
            "pagerduty-alert 1.2.3 (commit: abc123, built: 2024-03-01)"
        );

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["version"], "1.2.3");
        assert_eq!(json["commit"], "abc123");
        assert_eq!(json["build_date"], "2024-03-01");
    }
}
