//! chatpatch - apply an ordered set of exact-text replacement rules to a source file
//!
//! The built-in rule set rewrites the lead modal so its chat tab can take the
//! full screen. Rules are applied in sequence to an in-memory working copy and
//! the file is rewritten only if something changed.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod applier;
pub mod config;
pub mod error;
pub mod output;
pub mod rule;

pub use applier::{PatchReport, apply_patches, apply_rules};
pub use error::{ConfigError, PatchError, RuleError};
pub use rule::{Rule, RuleKind, RuleSet};
