// src/test_support.rs
//
// Scripted stand-ins for the terminal and the process executor, so the FSM
// and the loader can be driven end to end without a tty, a network, or git.

use crate::cli::prompt::Prompter;
use crate::system::executor::{CommandRunner, ExecutionError};
use anyhow::Result;
use std::collections::{HashMap, HashSet, VecDeque};

/// A `Prompter` fed from queued answers. Any prompt without a queued answer
/// panics, which makes unexpected interaction an immediate test failure.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    interactive: bool,
    inputs: VecDeque<String>,
    confirms: VecDeque<bool>,
    selections: VecDeque<usize>,
    /// Everything printed via `say`/`status`, for assertions on messages.
    pub transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn inputs<'a>(mut self, answers: impl IntoIterator<Item = &'a str>) -> Self {
        self.inputs.extend(answers.into_iter().map(str::to_string));
        self
    }

    pub fn confirms(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.confirms.extend(answers);
        self
    }

    pub fn selections(mut self, answers: impl IntoIterator<Item = usize>) -> Self {
        self.selections.extend(answers);
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        match self.inputs.pop_front() {
            Some(answer) => Ok(answer),
            None => panic!("unexpected input prompt: {prompt}"),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        match self.confirms.pop_front() {
            Some(answer) => Ok(answer),
            None => panic!("unexpected confirm prompt: {prompt}"),
        }
    }

    fn select(&mut self, title: &str, items: &[String]) -> Result<usize> {
        match self.selections.pop_front() {
            Some(index) => {
                assert!(index < items.len(), "selection out of range for '{title}'");
                Ok(index)
            }
            None => panic!("unexpected select prompt: {title}"),
        }
    }

    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn status(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn pause(&mut self) {}

    fn clear_screen(&mut self) {}
}

/// A `CommandRunner` that records every command line instead of spawning
/// processes. `capture` answers from a canned map; `run` succeeds unless the
/// command was registered with `fail_on` (the executor's `-` ignore-errors
/// prefix is honored and stripped before recording).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub commands: Vec<String>,
    captures: HashMap<String, String>,
    failing: HashSet<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capture(mut self, command_line: &str, output: &str) -> Self {
        self.captures
            .insert(command_line.to_string(), output.to_string());
        self
    }

    pub fn fail_on(mut self, command_line: &str) -> Self {
        self.failing.insert(command_line.to_string());
        self
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command_line: &str) -> Result<(), ExecutionError> {
        let trimmed = command_line.trim();
        let (line, ignore_errors) = match trimmed.strip_prefix('-') {
            Some(rest) => (rest.trim(), true),
            None => (trimmed, false),
        };
        self.commands.push(line.to_string());
        if self.failing.contains(line) && !ignore_errors {
            return Err(ExecutionError::NonZeroExitStatus(line.to_string()));
        }
        Ok(())
    }

    fn capture(&mut self, command_line: &str) -> Result<String, ExecutionError> {
        self.commands.push(command_line.to_string());
        self.captures
            .get(command_line)
            .cloned()
            .ok_or_else(|| ExecutionError::NonZeroExitStatus(command_line.to_string()))
    }
}
