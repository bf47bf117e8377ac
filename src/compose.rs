//! Compose-file scanning — one [`ServiceEntry`] per declared service.
//!
//! Files are parsed as YAML with a top-level `services` mapping. A file
//! that fails to parse is logged and skipped as a whole; the run continues
//! with the remaining files. The source line of each service is recovered
//! by scanning the raw text for its `container_name:` declaration, since
//! the YAML parser does not expose source positions.

use crate::model::{Service, ServiceEntry, TagRegistry, ANNOTATIONS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Link kinds probed on each service, in output order: display label and
/// the `readme.links.<kind>` label-key suffix.
const LINK_KINDS: &[(&str, &str)] = &[
    ("GitHub", "github"),
    ("GitLab", "gitlab"),
    ("Docker Hub", "docker"),
    ("Website", "web"),
];

/// Label key holding the human description of a service.
const DESCRIPTION_KEY: &str = "readme.description";

#[derive(Debug, Default, Deserialize)]
struct ComposeFile {
    /// Kept as a raw mapping so declaration order survives; values are
    /// decoded into [`Service`] one at a time.
    #[serde(default)]
    services: serde_yaml::Mapping,
}

/// Scan one compose file into service entries, assigning footnote numbers
/// through `registry`. Read failures abort; parse failures are recovered.
pub fn scan_file(path: &Path, registry: &mut TagRegistry) -> Result<Vec<ServiceEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!("processing compose file {}", path.display());
    Ok(collect_entries(
        &path.display().to_string(),
        &content,
        registry,
    ))
}

/// Core of the scan, split from file I/O for testability.
fn collect_entries(source: &str, content: &str, registry: &mut TagRegistry) -> Vec<ServiceEntry> {
    let compose: ComposeFile = match serde_yaml::from_str(content) {
        Ok(compose) => compose,
        Err(e) => {
            error!("failed to parse yaml: {e}");
            return Vec::new();
        }
    };

    let declared = compose.services.len();
    let mut entries = Vec::new();
    for (key, value) in &compose.services {
        let Some(name) = key.as_str() else {
            error!("non-string service key in {source}");
            break;
        };
        let service: Service = match serde_yaml::from_value(value.clone()) {
            Ok(service) => service,
            Err(e) => {
                error!("failed to parse service {name} in {source}: {e}");
                break;
            }
        };
        if let Some(entry) = build_entry(source, content, name, &service, registry) {
            entries.push(entry);
        }
    }
    info!("processed {declared} services in {source}");
    entries
}

/// Build a single table entry, or `None` when the declaration line cannot
/// be located (logged, row skipped).
fn build_entry(
    source: &str,
    content: &str,
    name: &str,
    service: &Service,
    registry: &mut TagRegistry,
) -> Option<ServiceEntry> {
    let Some(source_line) = find_declaration_line(content, name) else {
        error!("no 'container_name: {name}' line found in {source}");
        return None;
    };

    let footnotes = ANNOTATIONS
        .iter()
        .enumerate()
        .filter(|(_, rule)| (rule.applies)(service))
        .map(|(index, _)| registry.number(index))
        .collect();

    let description = service
        .labels
        .get(DESCRIPTION_KEY)
        .cloned()
        .unwrap_or_default();

    let links = LINK_KINDS
        .iter()
        .filter_map(|&(label, kind)| {
            service
                .labels
                .get(&format!("readme.links.{kind}"))
                .map(|url| (label, url.clone()))
        })
        .collect();

    Some(ServiceEntry {
        name: name.to_string(),
        source_file: source.to_string(),
        source_line,
        footnotes,
        description,
        ports: service.ports.clone(),
        links,
    })
}

/// 1-based number of the first line containing the service's
/// `container_name:` declaration, matched as a literal substring.
fn find_declaration_line(content: &str, name: &str) -> Option<usize> {
    let needle = format!("container_name: {name}");
    content
        .lines()
        .position(|line| line.contains(&needle))
        .map(|index| index + 1)
}
