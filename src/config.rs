//! Rule files
//!
//! A rule set can be loaded from TOML instead of using the built-in rules:
//!
//! ```toml
//! target = "components/Modal.tsx"
//! summary = ["Sidebar hidden"]
//!
//! [[rule]]
//! name = "Hide sidebar"
//! search = "<aside>"
//! replace = "{show && <aside>}"
//!
//! [[rule]]
//! kind = "regex"
//! search = 'w-(\d+)'
//! replace = "w-$1 scrollbar-thin"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::rule::{DEFAULT_TARGET, Rule, RuleKind, RuleSet};

/// On-disk shape of a rule file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    /// File to patch when no path is given on the command line
    #[serde(default)]
    pub target: Option<String>,
    /// Summary lines printed after a successful patch
    #[serde(default)]
    pub summary: Vec<String>,
    /// Rules in application order
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,
}

/// A single `[[rule]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    /// Display name; defaults to `Fix <n>`
    #[serde(default)]
    pub name: Option<String>,
    /// Text or pattern to search for
    pub search: String,
    /// Replacement text
    pub replace: String,
    /// Match mode
    #[serde(default)]
    pub kind: RuleKind,
}

impl RuleFile {
    /// Compile into a validated [`RuleSet`]
    pub fn into_rule_set(self, path: &Path) -> Result<RuleSet, ConfigError> {
        if self.rules.is_empty() {
            return Err(ConfigError::NoRules(path.to_path_buf()));
        }

        let rules = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let name = entry.name.unwrap_or_else(|| format!("Fix {}", i + 1));
                Rule::new(entry.kind, name, entry.search, entry.replace)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let target = self.target.unwrap_or_else(|| DEFAULT_TARGET.to_string());
        Ok(RuleSet::new(target, rules).with_summary(self.summary))
    }
}

/// Parse rule-file content; `path` is only used in error messages
pub fn parse_rule_set(content: &str, path: &Path) -> Result<RuleSet, ConfigError> {
    let file: RuleFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    file.into_rule_set(path)
}

/// Load and validate a rule file from disk
pub fn load_rule_set(path: &Path) -> Result<RuleSet, ConfigError> {
    log::debug!("Loading rules from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_rule_set(&content, path)?;
    log::debug!("Loaded {} rule(s) targeting {}", set.len(), set.target.display());
    Ok(set)
}
