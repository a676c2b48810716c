// src/system/executor.rs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Seam for external command execution. The production implementation spawns
/// real processes; tests substitute a recorder with canned output.
pub trait CommandRunner {
    /// Runs a command to completion with inherited stdio.
    ///
    /// A leading `-` on the command line means "ignore a non-zero exit".
    fn run(&mut self, command_line: &str) -> Result<(), ExecutionError>;

    /// Runs a command and captures its standard output. Stderr is discarded
    /// (these are short probe commands whose noise the user should not see).
    fn capture(&mut self, command_line: &str) -> Result<String, ExecutionError>;
}

/// Executes commands in a fixed working directory.
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command_line: &str) -> Result<(), ExecutionError> {
        execute_command(command_line, &self.cwd)
    }

    fn capture(&mut self, command_line: &str) -> Result<String, ExecutionError> {
        execute_and_capture_output(command_line, &self.cwd)
    }
}

/// Executes a system command and blocks until it finishes. Stdout and stderr
/// pass straight through to the user's terminal.
pub fn execute_command(command_line: &str, cwd: &Path) -> Result<(), ExecutionError> {
    let trimmed_command = command_line.trim();
    if trimmed_command.is_empty() {
        return Ok(()); // An empty command is a success, not an error.
    }

    let (final_command_line, ignore_errors) = match trimmed_command.strip_prefix('-') {
        Some(rest) => (rest.trim(), true),
        None => (trimmed_command, false),
    };

    if final_command_line.is_empty() {
        return Ok(());
    }

    let parts = shlex::split(final_command_line)
        .ok_or_else(|| ExecutionError::CommandParse(final_command_line.to_string()))?;
    let Some((program, args)) = parts.split_first() else {
        return Ok(());
    };

    let clean_cwd = dunce::simplified(cwd);

    let mut command = StdCommand::new(program);
    command
        .args(args)
        .current_dir(clean_cwd)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    // Fallback logic for Windows built-in commands like `echo`.
    // We try to spawn directly first. If it fails with `NotFound`, we try with `cmd /C`.
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound && cfg!(target_os = "windows") => {
            log::debug!("Command '{}' not found. Retrying with cmd /C.", program);
            StdCommand::new("cmd")
                .arg("/C")
                .arg(final_command_line) // Pass the full, unparsed line to cmd
                .current_dir(clean_cwd)
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .spawn()
                .map_err(|e| ExecutionError::CommandFailed(final_command_line.to_string(), e))?
        }
        Err(e) => {
            return Err(ExecutionError::CommandFailed(
                final_command_line.to_string(),
                e,
            ));
        }
    };

    let status = child
        .wait()
        .map_err(|e| ExecutionError::CommandFailed(final_command_line.to_string(), e))?;

    if !status.success() && !ignore_errors {
        return Err(ExecutionError::NonZeroExitStatus(
            final_command_line.to_string(),
        ));
    }
    Ok(())
}

/// Executes a command and captures its standard output. Stderr goes to the
/// null device, matching how probe commands are meant to stay quiet.
pub fn execute_and_capture_output(
    command_line: &str,
    cwd: &Path,
) -> Result<String, ExecutionError> {
    let trimmed_command = command_line.trim();
    if trimmed_command.is_empty() {
        return Ok(String::new());
    }

    let parts = shlex::split(trimmed_command)
        .ok_or_else(|| ExecutionError::CommandParse(trimmed_command.to_string()))?;
    let Some((program, args)) = parts.split_first() else {
        return Ok(String::new());
    };

    let clean_cwd = dunce::simplified(cwd);

    let command_output = StdCommand::new(program)
        .args(args)
        .current_dir(clean_cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| ExecutionError::CommandFailed(trimmed_command.to_string(), e))?;

    if !command_output.status.success() {
        return Err(ExecutionError::NonZeroExitStatus(
            trimmed_command.to_string(),
        ));
    }

    String::from_utf8(command_output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: trimmed_command.to_string(),
        source: e,
    })
}
