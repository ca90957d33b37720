//! GitHub Actions workflow commands (`::error::`, `::add-mask::`) and step
//! outputs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Escape a command value the way the runner expects.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

pub fn mask_command(secret: &str) -> String {
    format!("::add-mask::{}", escape_data(secret))
}

/// Append `name=value` to the file named by `GITHUB_OUTPUT`.
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Opening step output file {}", path.display()))?;
    writeln!(file, "{name}={value}")
        .with_context(|| format!("Writing step output {name}"))?;
    Ok(())
}
