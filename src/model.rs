//! Data model for the generated document — input and output side.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Per-service configuration as declared in a compose file.
///
/// Only the keys the generator inspects are modeled; everything else
/// (image, volumes, restart policy, ...) is ignored during deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    pub network_mode: Option<String>,
    /// String-to-string label map; `readme.*` keys drive the output.
    pub labels: BTreeMap<String, String>,
    pub ports: Vec<String>,
}

/// One row of the service table.
#[derive(Debug)]
pub struct ServiceEntry {
    pub name: String,
    pub source_file: String,
    /// 1-based line of the `container_name:` declaration.
    pub source_line: usize,
    /// Display numbers of the annotations that matched, in rule order.
    pub footnotes: Vec<usize>,
    pub description: String,
    pub ports: Vec<String>,
    /// (label, url) pairs in fixed kind order.
    pub links: Vec<(&'static str, String)>,
}

/// One row of the environment-variable table.
#[derive(Debug, PartialEq, Eq)]
pub struct EnvEntry {
    pub name: String,
    pub description: String,
    pub example: String,
}

/// A footnote rule: predicate over a service's configuration plus the
/// fixed note text shown when it matches.
pub struct Annotation {
    pub applies: fn(&Service) -> bool,
    pub note: &'static str,
}

fn routed_via_tunnel(service: &Service) -> bool {
    service.network_mode.as_deref() == Some("service:tunnel")
}

/// All footnote rules, in evaluation order.
pub const ANNOTATIONS: &[Annotation] = &[Annotation {
    applies: routed_via_tunnel,
    note: "All traffic is routed via tunnel VPN client container.",
}];

/// Assigns dense display numbers to annotation rules in first-seen order.
///
/// The same rule index always yields the same number for the rest of the
/// run, so footnote markers stay stable across files.
#[derive(Debug, Default)]
pub struct TagRegistry {
    seen: Vec<usize>,
}

impl TagRegistry {
    /// Display number for a rule index, assigning the next one on first use.
    pub fn number(&mut self, rule: usize) -> usize {
        match self.seen.iter().position(|&r| r == rule) {
            Some(pos) => pos + 1,
            None => {
                self.seen.push(rule);
                self.seen.len()
            }
        }
    }

    /// Registered footnotes as (display number, note text), in display order.
    pub fn definitions(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.seen
            .iter()
            .enumerate()
            .map(|(pos, &rule)| (pos + 1, ANNOTATIONS[rule].note))
    }
}
