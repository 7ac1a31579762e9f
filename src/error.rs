//! Error types for rule construction, rule-file loading and patching
//!
//! Patch failures are split the way users need to act on them: a missing
//! target file gets its own variant, everything else that can go wrong while
//! reading or writing is grouped as an unexpected I/O failure. A patch that
//! matches nothing is not an error at all; see [`crate::applier::PatchReport`].

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors raised when a rule is constructed or validated
#[derive(Debug, Error)]
pub enum RuleError {
    /// The search text is empty and would match between every character
    #[error("rule '{name}' has an empty search text")]
    EmptySearch {
        /// Name of the offending rule
        name: String,
    },

    /// The regex pattern failed to compile
    #[error("rule '{name}' has an invalid pattern: {source}")]
    InvalidRegex {
        /// Name of the offending rule
        name: String,
        /// Underlying regex error
        source: regex::Error,
    },

    /// The regex pattern matches the empty string
    #[error("rule '{name}' has a pattern that matches the empty string")]
    MatchesEmpty {
        /// Name of the offending rule
        name: String,
    },
}

/// Errors raised while loading a rule file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rule file could not be read
    #[error("failed to read rule file {}: {source}", path.display())]
    Read {
        /// Path of the rule file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The rule file is not valid TOML or has the wrong shape
    #[error("failed to parse rule file {}: {source}", path.display())]
    Parse {
        /// Path of the rule file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// The rule file declares no rules
    #[error("rule file {} declares no rules", .0.display())]
    NoRules(PathBuf),

    /// One of the declared rules is invalid
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Errors raised while patching a target file
#[derive(Debug, Error)]
pub enum PatchError {
    /// The target file does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the target failed for a reason other than absence
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the target file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Writing the patched content back failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path of the target file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

/// Coarse classification of a [`PatchError`] for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchErrorKind {
    /// Target file is missing
    NotFound,
    /// Any other read or write failure
    Unexpected,
}

impl PatchError {
    /// Classify a read failure, separating a missing file from other causes
    #[must_use]
    pub fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wrap a write failure
    #[must_use]
    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Reporting class of this error
    #[must_use]
    pub const fn kind(&self) -> PatchErrorKind {
        match self {
            Self::NotFound(_) => PatchErrorKind::NotFound,
            Self::Read { .. } | Self::Write { .. } => PatchErrorKind::Unexpected,
        }
    }
}
