//! Template substitution — `{containers}` and `{envs}` placeholders.
//!
//! `{{` and `}}` are literal-brace escapes. Anything else brace-shaped is
//! a template error: an unknown placeholder name or a stray single brace
//! aborts the run rather than silently passing through.

use anyhow::{bail, Result};
use regex::Regex;
use std::sync::LazyLock;

// Alternation order matters: escapes before named placeholders before
// stray single braces.
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}|[{}]").unwrap()
});

/// Substitute both placeholders into `template`.
pub fn render(template: &str, containers: &str, envs: &str) -> Result<String> {
    let mut output = String::with_capacity(template.len() + containers.len() + envs.len());
    let mut last = 0;
    for caps in RE_TOKEN.captures_iter(template) {
        let token = caps.get(0).unwrap();
        output.push_str(&template[last..token.start()]);
        last = token.end();
        match token.as_str() {
            "{{" => output.push('{'),
            "}}" => output.push('}'),
            "{" | "}" => bail!("unmatched '{}' in template", token.as_str()),
            _ => match &caps[1] {
                "containers" => output.push_str(containers),
                "envs" => output.push_str(envs),
                name => bail!("unknown placeholder {{{name}}} in template"),
            },
        }
    }
    output.push_str(&template[last..]);
    Ok(output)
}
