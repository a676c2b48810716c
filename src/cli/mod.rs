// src/cli/mod.rs

pub mod prompt;

use clap::Parser;
use std::path::PathBuf;

/// vcs-gh: a finite-state, menu-driven assistant for Git/GitHub workflows.
///
/// On launch the tool prints an environment report, loads `KEY=VALUE` pairs
/// from a dotenv file into the process environment, walks through git
/// credential setup and repository cloning, and then drops into an arrow-key
/// menu of everyday operations (semantic push + PR, fetch-and-reset, quick
/// commit, remote branch deletion).
///
/// Configuration keys consumed from the dotenv file:
///
/// - `USERNAMES` / `EMAILS`:   `;`-separated, equal-length credential lists.
/// - `URLS` / `REPO_NAMES`:    `;`-separated, equal-length clone lists.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the dotenv file to load and to append interactive entries to.
    #[arg(long, default_value = crate::constants::ENV_FILENAME)]
    pub env_file: PathBuf,

    /// Skip the startup environment report.
    #[arg(long)]
    pub no_report: bool,
}
