//! Environment-file scanning — one [`EnvEntry`] per `key=value` line.
//!
//! Files matching `.env.*` in the working directory are processed in
//! lexicographic order. A `#` comment line becomes the description of the
//! next variable line only; a variable line without a `=` separator is a
//! format error that aborts the run.

use crate::model::EnvEntry;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Glob matching the environment files picked up from the working directory.
const ENV_GLOB: &str = ".env.*";

/// Scan all matching environment files into table entries.
pub fn scan_env_files() -> Result<Vec<EnvEntry>> {
    let mut paths: Vec<PathBuf> = glob::glob(ENV_GLOB)
        .context("invalid environment file pattern")?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut entries = Vec::new();
    for path in &paths {
        info!("processing variables in {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_entries = parse_lines(&content)
            .with_context(|| format!("in {}", path.display()))?;
        info!(
            "processed {} variables in {}",
            file_entries.len(),
            path.display()
        );
        entries.extend(file_entries);
    }
    Ok(entries)
}

/// Pair comment lines with the variable line that follows them.
///
/// The pending comment applies to exactly one variable line and is cleared
/// afterwards, so a variable preceded by another variable has an empty
/// description.
fn parse_lines(content: &str) -> Result<Vec<EnvEntry>> {
    let mut entries = Vec::new();
    let mut comment = String::new();
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        if line.starts_with('#') {
            comment = line.trim_start_matches('#').trim().to_string();
        } else {
            let Some((name, example)) = line.split_once('=') else {
                bail!("missing '=' separator in variable line: {line}");
            };
            entries.push(EnvEntry {
                name: name.to_string(),
                description: std::mem::take(&mut comment),
                example: example.trim().to_string(),
            });
        }
    }
    Ok(entries)
}
