use crate::cli::SendArgs;

/// Action inputs after normalization. A field is `None` when the input was
/// absent or blank.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub integration_key: Option<String>,
    pub severity: Option<String>,
    pub summary: Option<String>,
    pub region: Option<String>,
    pub environment: Option<String>,
    pub dedup_key: Option<String>,
}

impl Inputs {
    /// Trim every value the way the Actions toolkit does for `getInput`.
    pub fn from_args(args: &SendArgs) -> Self {
        Self {
            integration_key: normalize(args.integration_key.as_deref()),
            severity: normalize(args.severity.as_deref()),
            summary: normalize(args.summary.as_deref()),
            region: normalize(args.region.as_deref()),
            environment: normalize(args.environment.as_deref()),
            dedup_key: normalize(args.dedup_key.as_deref()),
        }
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
