// src/cli/prompt.rs
//
// All interactive input goes through the `Prompter` trait so the FSM and the
// loader can be driven by a scripted implementation in tests (or batch use)
// instead of a live terminal.

use anyhow::Result;
use dialoguer::{
    Confirm, Input, Select,
    console::{self, Term},
    theme::ColorfulTheme,
};
use std::time::Duration;

/// Capability interface over the terminal: free-text prompts, confirmations,
/// arrow-key menus, and the small presentation helpers the workflow uses.
pub trait Prompter {
    /// Whether a human is attached; gates the loader's interactive fallback.
    fn is_interactive(&self) -> bool;

    /// Reads one line of free text. An empty answer is allowed and meaningful
    /// (most flows treat it as "cancel").
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Shows an arrow-key menu and returns the selected index.
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize>;

    /// Prints a line of text.
    fn say(&mut self, text: &str);

    /// Prints a short status line with a trailing "..." animation.
    fn status(&mut self, text: &str);

    /// Blocks until the user presses a key.
    fn pause(&mut self);

    /// Clears the screen.
    fn clear_screen(&mut self);
}

/// The real, dialoguer-backed prompter.
pub struct ConsolePrompter {
    term: Term,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn is_interactive(&self) -> bool {
        console::user_attended()
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }

    fn select(&mut self, title: &str, items: &[String]) -> Result<usize> {
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn status(&mut self, text: &str) {
        // Three-step "..." animation, overwriting the line each tick.
        for dots in 1..=3 {
            print!("\r{}{}", text, ".".repeat(dots));
            let _ = self.term.flush();
            std::thread::sleep(Duration::from_millis(450));
        }
        println!();
    }

    fn pause(&mut self) {
        print!("Press any key to continue...");
        let _ = self.term.flush();
        let _ = self.term.read_key();
        println!();
    }

    fn clear_screen(&mut self) {
        let _ = self.term.clear_screen();
    }
}
