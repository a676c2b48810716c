// src/bin/vcs-gh.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use vcs_gh::{
    cli::{Cli, prompt::ConsolePrompter},
    core::{env_store::ProcessEnv, fsm::Session, report},
    system::executor::SystemRunner,
};

/// Sets up logging, parses arguments, runs the state machine, and performs
/// centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let root = std::env::current_dir().context("could not determine the current directory")?;

    let mut env = ProcessEnv;
    let mut ui = ConsolePrompter::new();
    let mut runner = SystemRunner::new(root.clone());

    if !cli.no_report {
        report::startup_report(&mut ui, &root);
    }

    let mut session = Session::new(
        &mut env,
        &mut ui,
        &mut runner,
        cli.env_file,
        root,
        dirs::home_dir(),
    );
    session.run()
}
