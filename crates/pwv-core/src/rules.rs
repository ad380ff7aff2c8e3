//! Rule library loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use pwv_model::{PwvError, Result};
use tracing::info;

use crate::rule::{Rule, parse_rule};

/// Parse every non-empty trimmed line of `text` as a rule.
pub fn parse_rules(text: &str) -> Vec<Rule> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_rule)
        .collect()
}

/// Load the rule library at `path`.
///
/// A missing file is fatal: without rules there is nothing to generate.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => PwvError::RulesNotFound {
            path: path.to_path_buf(),
        },
        _ => PwvError::RulesUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let rules = parse_rules(&text);
    info!(path = %path.display(), rule_count = rules.len(), "loaded rules");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        let rules = parse_rules("string\n\n   \n  string + number  \r\n");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].source, "string + number");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_rules(&dir.path().join("rules.txt")).unwrap_err();
        assert!(matches!(error, PwvError::RulesNotFound { .. }));
    }
}
