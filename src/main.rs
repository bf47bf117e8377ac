//! composedoc — generate a README from docker-compose service definitions.
//!
//! Scans compose files for services annotated with `readme.*` labels and
//! `.env.*` files for documented variables, then substitutes the two
//! resulting markdown tables into a template:
//!
//! ```text
//! composedoc -t README.tmpl.md -o README.md compose/*.yml
//! ```

mod compose;
mod envfile;
mod model;
mod render;
mod template;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "composedoc",
    about = "Generate README.md from docker-compose files"
)]
struct Cli {
    /// docker-compose files to process (glob patterns supported)
    files: Vec<String>,

    /// README template file
    #[arg(short = 't', long, default_value = "README.tmpl.md")]
    template: PathBuf,

    /// Output file name
    #[arg(short = 'o', long, default_value = "README.md")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut registry = model::TagRegistry::default();
    let mut services = Vec::new();
    for path in &expand_globs(&cli.files)? {
        services.extend(compose::scan_file(path, &mut registry)?);
    }

    let variables = envfile::scan_env_files()?;

    let container_table = render::container_table(&services, &registry);
    let env_table = render::env_table(&variables);

    info!("reading template {}", cli.template.display());
    let tpl = fs::read_to_string(&cli.template)
        .with_context(|| format!("failed to read template {}", cli.template.display()))?;
    let readme = template::render(&tpl, &container_table, &env_table)?;

    info!("writing {}", cli.output.display());
    fs::write(&cli.output, readme)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!("done");
    Ok(())
}

/// Expand glob patterns into a sorted, de-duplicated list of file paths.
/// Plain paths pass through untouched so a missing file still surfaces as
/// a read error later instead of vanishing silently.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            files.push(PathBuf::from(pattern));
            continue;
        }
        let matches: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {pattern}"))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {pattern}");
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}
