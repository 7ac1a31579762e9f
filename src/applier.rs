//! Patch applier
//!
//! Reads the target file once, runs every rule of a [`RuleSet`] against the
//! working copy in order, and writes the result back only when the working
//! copy differs from the baseline. The write is a single full-content
//! overwrite, never one write per rule.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PatchError;
use crate::output::{self, OutputMode, PatchResult};
use crate::rule::{Rule, RuleSet};

/// Baseline and working copy of the target file
#[derive(Debug, Clone)]
pub struct Document {
    original: String,
    content: String,
}

impl Document {
    /// Start from in-memory text
    #[must_use]
    pub fn new(original: String) -> Self {
        Self {
            content: original.clone(),
            original,
        }
    }

    /// Read the whole file as UTF-8
    pub fn load(path: &Path) -> Result<Self, PatchError> {
        let original = fs::read_to_string(path).map_err(|e| PatchError::read(path, e))?;
        Ok(Self::new(original))
    }

    /// Apply one rule to the working copy, returning the occurrence count
    pub fn apply(&mut self, rule: &Rule) -> usize {
        let (next, occurrences) = rule.apply(&self.content);
        if occurrences > 0 {
            self.content = next;
        }
        occurrences
    }

    /// Content as read from disk
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Current working copy
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the working copy differs from the baseline
    #[must_use]
    pub fn changed(&self) -> bool {
        self.content != self.original
    }

    /// Overwrite `path` with the working copy
    pub fn save(&self, path: &Path) -> Result<(), PatchError> {
        fs::write(path, &self.content).map_err(|e| PatchError::write(path, e))
    }
}

/// Progress events emitted while a patch runs
#[derive(Debug, Clone, Copy)]
pub enum Stage<'a> {
    /// About to read the target
    Reading(&'a Path),
    /// A rule has been applied
    Applied {
        /// Zero-based position of the rule in its set
        index: usize,
        /// The rule that ran
        rule: &'a Rule,
        /// Occurrences it replaced
        occurrences: usize,
    },
    /// About to write the patched content
    Saving(&'a Path),
}

/// Result of running one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    /// Rule name
    pub name: String,
    /// Occurrences replaced
    pub occurrences: usize,
}

/// Result of a patch run that got past reading the file
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    /// Target file
    pub path: PathBuf,
    /// Per-rule outcomes in application order
    pub rules: Vec<RuleOutcome>,
    /// Whether the file was rewritten
    pub changed: bool,
}

impl PatchReport {
    /// Names of rules that matched nothing
    #[must_use]
    pub fn unmatched(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.occurrences == 0)
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Total occurrences replaced across all rules
    #[must_use]
    pub fn total_occurrences(&self) -> usize {
        self.rules.iter().map(|r| r.occurrences).sum()
    }
}

/// Run `rules` against `path`
pub fn apply_rules(path: &Path, rules: &RuleSet) -> Result<PatchReport, PatchError> {
    apply_rules_with(path, rules, |_| {})
}

/// Run `rules` against `path`, reporting each stage to `on_stage`
pub fn apply_rules_with<F>(
    path: &Path,
    rules: &RuleSet,
    mut on_stage: F,
) -> Result<PatchReport, PatchError>
where
    F: FnMut(Stage<'_>),
{
    on_stage(Stage::Reading(path));
    let mut doc = Document::load(path)?;
    log::debug!("Read {} byte(s) from {}", doc.original().len(), path.display());

    let mut outcomes = Vec::with_capacity(rules.len());
    for (index, rule) in rules.rules.iter().enumerate() {
        let occurrences = doc.apply(rule);
        log::debug!("Rule {} '{}': {occurrences} occurrence(s)", index + 1, rule.name);
        on_stage(Stage::Applied {
            index,
            rule,
            occurrences,
        });
        outcomes.push(RuleOutcome {
            name: rule.name.clone(),
            occurrences,
        });
    }

    let changed = doc.changed();
    if changed {
        on_stage(Stage::Saving(path));
        doc.save(path)?;
        log::debug!("Wrote {} byte(s) to {}", doc.content().len(), path.display());
    } else {
        log::debug!("No rule changed {}, leaving it untouched", path.display());
    }

    Ok(PatchReport {
        path: path.to_path_buf(),
        rules: outcomes,
        changed,
    })
}

/// Patch `path` with `rules`, rendering progress and the outcome.
///
/// Never fails: a missing file, an I/O error and a patch that matched
/// nothing are all reported and yield `false`. Returns `true` only when the
/// file was rewritten.
pub fn apply_patches(path: &Path, rules: &RuleSet, mode: OutputMode) -> bool {
    let result = apply_rules_with(path, rules, |stage| output::render_stage(stage, mode));
    if let Err(e) = &result {
        log::debug!("Patch failed: {e}");
    }

    let rendered = PatchResult::new(path, rules, &result);
    rendered.render(mode);
    rendered.success
}
