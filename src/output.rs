//! Output formatting for human and JSON modes
//!
//! Human mode prints a progress line per stage followed by a banner and the
//! rule set's summary. JSON mode stays silent during the run and prints a
//! single [`PatchResult`] object at the end.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::applier::{PatchReport, RuleOutcome, Stage};
use crate::error::{PatchError, PatchErrorKind};
use crate::rule::{RuleKind, RuleSet};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Error details included in a [`PatchResult`]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// `not_found` or `unexpected`
    pub kind: PatchErrorKind,
    /// Human-readable description including the underlying cause
    pub message: String,
}

/// Final outcome of a patch run
#[derive(Debug, Clone, Serialize)]
pub struct PatchResult {
    /// Whether the file was rewritten
    pub success: bool,
    /// Target file
    pub path: String,
    /// Whether any rule changed the content (false when the run failed)
    pub changed: bool,
    /// Per-rule outcomes (empty if the file could not be read)
    pub rules: Vec<RuleOutcome>,
    /// Rules that matched nothing
    pub unmatched: Vec<String>,
    /// Summary of intended effects, present on success
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<String>,
    /// Error details when the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl PatchResult {
    /// Build from the result of [`crate::applier::apply_rules`]
    #[must_use]
    pub fn new(path: &Path, rules: &RuleSet, result: &Result<PatchReport, PatchError>) -> Self {
        match result {
            Ok(report) => Self {
                success: report.changed,
                path: path.display().to_string(),
                changed: report.changed,
                rules: report.rules.clone(),
                unmatched: report.unmatched().into_iter().map(String::from).collect(),
                summary: if report.changed {
                    rules.summary.clone()
                } else {
                    Vec::new()
                },
                error: None,
            },
            Err(err) => Self {
                success: false,
                path: path.display().to_string(),
                changed: false,
                rules: Vec::new(),
                unmatched: Vec::new(),
                summary: Vec::new(),
                error: Some(ErrorInfo {
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            },
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if let Some(err) = &self.error {
            match err.kind {
                PatchErrorKind::NotFound => {
                    println!("{} {}", "Error:".red().bold(), err.message);
                    println!("Make sure you run chatpatch from the project root.");
                },
                PatchErrorKind::Unexpected => {
                    println!("{} {}", "Unexpected error:".red().bold(), err.message);
                },
            }
            return;
        }

        if !self.success {
            println!(
                "{}",
                "No changes applied. Check whether the file was already patched or its format \
                 has changed."
                    .red()
            );
            return;
        }

        println!("{}", "Patch applied successfully.".green().bold());

        if !self.unmatched.is_empty() {
            println!(
                "{} {} rule(s) matched nothing: {}",
                "Warning:".yellow().bold(),
                self.unmatched.len(),
                self.unmatched.join(", ")
            );
        }

        if !self.summary.is_empty() {
            println!("\nSummary:");
            for line in &self.summary {
                println!("  - {line}");
            }
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Print a progress line for `stage` (human mode only)
pub fn render_stage(stage: Stage<'_>, mode: OutputMode) {
    if mode == OutputMode::Json {
        return;
    }

    match stage {
        Stage::Reading(path) => println!("Reading {}...", path.display()),
        Stage::Applied {
            index,
            rule,
            occurrences,
        } => {
            let status = if occurrences == 0 {
                "no match".dimmed().to_string()
            } else {
                format!("{occurrences} replaced")
            };
            println!("  Fix {}: {} ({status})", index + 1, rule.name);
        },
        Stage::Saving(path) => println!("Saving {}...", path.display()),
    }
}

/// A rule as shown by `--list`
#[derive(Debug, Serialize)]
pub struct RuleInfo {
    /// Rule name
    pub name: String,
    /// Match mode
    pub kind: RuleKind,
    /// Search text or pattern
    pub search: String,
    /// Replacement text
    pub replace: String,
}

/// Result of listing a rule set
#[derive(Debug, Serialize)]
pub struct RuleListResult {
    /// Default target file
    pub target: String,
    /// Rules in application order
    pub rules: Vec<RuleInfo>,
}

impl From<&RuleSet> for RuleListResult {
    fn from(set: &RuleSet) -> Self {
        Self {
            target: set.target.display().to_string(),
            rules: set
                .rules
                .iter()
                .map(|r| RuleInfo {
                    name: r.name.clone(),
                    kind: r.kind(),
                    search: r.search().to_string(),
                    replace: r.replacement().to_string(),
                })
                .collect(),
        }
    }
}

impl RuleListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Target: {}\n", self.target);
        for (i, rule) in self.rules.iter().enumerate() {
            println!("  {}. {} [{}]", i + 1, rule.name, rule.kind);
            println!("     search:  {:?}", rule.search);
            println!("     replace: {:?}\n", rule.replace);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
