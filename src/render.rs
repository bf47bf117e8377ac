//! Markdown table rendering for the two substituted blocks.

use crate::model::{EnvEntry, ServiceEntry, TagRegistry};

const CONTAINER_HEADER: [&str; 2] = [
    "| **Name** | **Description** | **Ports** | **Links** |",
    "|---|---|---|---|",
];

const ENV_HEADER: [&str; 2] = [
    "| **Variable** | **Description** | **Example** |",
    "|---|---|---|",
];

/// Service table plus the footnote definition block, separated by a blank
/// line. This is the full `containers` substitution value.
pub fn container_table(entries: &[ServiceEntry], registry: &TagRegistry) -> String {
    let mut lines: Vec<String> = CONTAINER_HEADER.iter().map(|s| s.to_string()).collect();
    lines.extend(entries.iter().map(service_row));

    let notes: Vec<String> = registry
        .definitions()
        .map(|(number, note)| format!("<sup>{number}</sup>{note}"))
        .collect();

    format!("{}\n\n{}", lines.join("\n"), notes.join("\n\n"))
}

/// Environment table with trailing newline — the `envs` substitution value.
pub fn env_table(entries: &[EnvEntry]) -> String {
    let mut lines: Vec<String> = ENV_HEADER.iter().map(|s| s.to_string()).collect();
    lines.extend(entries.iter().map(env_row));
    format!("{}\n", lines.join("\n"))
}

/// `| [name](file#Lline) marker | description | ports | links |`
///
/// The footnote marker is omitted entirely (including its separating space)
/// when no annotation matched.
fn service_row(entry: &ServiceEntry) -> String {
    let marker = if entry.footnotes.is_empty() {
        String::new()
    } else {
        let numbers: Vec<String> = entry.footnotes.iter().map(ToString::to_string).collect();
        format!(" <sup>{}</sup>", numbers.join(","))
    };

    let ports: Vec<String> = entry.ports.iter().map(|port| format!("`{port}`")).collect();
    let links: Vec<String> = entry
        .links
        .iter()
        .map(|(label, url)| format!("[{label}]({url})"))
        .collect();

    table_row(&[
        format!(
            "[{}]({}#L{}){}",
            entry.name, entry.source_file, entry.source_line, marker
        ),
        entry.description.clone(),
        ports.join(", "),
        links.join(", "),
    ])
}

fn env_row(entry: &EnvEntry) -> String {
    table_row(&[
        format!("`{}`", entry.name),
        entry.description.clone(),
        format!("`{}`", entry.example),
    ])
}

/// Join cells into a markdown row; an empty cell collapses to `| |` rather
/// than leaving a double space.
fn table_row(cells: &[String]) -> String {
    let mut row = String::from("|");
    for cell in cells {
        if !cell.is_empty() {
            row.push(' ');
            row.push_str(cell);
        }
        row.push_str(" |");
    }
    row
}
