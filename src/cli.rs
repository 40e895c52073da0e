use anyhow::{bail, Result};
use clap::ValueEnum;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryFormat {
    Text,
    Json,
}

/// Splits a comma separated format list, dropping blanks and a leading dot.
pub fn parse_formats(raw: &str) -> Result<Vec<String>> {
    let formats: Vec<String> = raw
        .split(',')
        .map(|f| f.trim().trim_start_matches('.').to_string())
        .filter(|f| !f.is_empty())
        .collect();

    if formats.is_empty() {
        bail!("at least one format is required (e.g. --formats txt,epub)");
    }
    if let Some(bad) = formats.iter().find(|f| f.contains(['/', '\\'])) {
        bail!("invalid format token: {:?}", bad);
    }
    Ok(formats)
}
