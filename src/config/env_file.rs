// ABOUTME: Parser for key=value env files, the local source of truth
// ABOUTME: for environment reconciliation against the control plane.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::error::Result;

/// Parse a `key=value` env file into an ordered map.
///
/// Blank lines and lines starting with `#` are skipped. The first `=` splits
/// key from value; later `=` characters belong to the value. Lines with no
/// `=` are skipped with a warning rather than failing the whole file.
pub fn parse_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_env_content(&content))
}

fn parse_env_content(content: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    warn!(line = lineno + 1, "env file line has empty key, skipping");
                    continue;
                }
                vars.insert(key.to_string(), value.to_string());
            }
            None => {
                warn!(line = lineno + 1, "env file line has no '=', skipping");
            }
        }
    }

    vars
}
