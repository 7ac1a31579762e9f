//! CLI definitions and entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chatpatch::output::{OutputMode, RuleListResult};
use chatpatch::{RuleSet, applier, config};

/// chatpatch - let the lead modal's chat tab take the full screen
#[derive(Parser, Debug)]
#[command(
    name = "chatpatch",
    version,
    about = "Apply exact-text replacement rules to a UI source file",
    long_about = "Apply an ordered list of exact-text replacement rules to a source file.\n\n\
                  Without arguments, patches components/LeadFullViewModal.tsx in the current \
                  directory so the chat tab takes the full screen. The file is rewritten only \
                  if at least one rule matched."
)]
pub struct Cli {
    /// File to patch (defaults to the rule set's target)
    pub path: Option<PathBuf>,

    /// Load rules from a TOML file instead of the built-in set
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Print the rules without touching any file
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let rules = match &cli.rules {
        Some(path) => config::load_rule_set(path)
            .with_context(|| format!("invalid rule file {}", path.display()))?,
        None => RuleSet::chat_fullscreen(),
    };

    if cli.list {
        RuleListResult::from(&rules).render(output_mode);
        return Ok(());
    }

    let path = cli.path.unwrap_or_else(|| rules.target.clone());
    // Patch outcomes are reported on stdout only; the exit status stays 0.
    let patched = applier::apply_patches(&path, &rules, output_mode);
    log::debug!("Patched: {patched}");
    Ok(())
}
