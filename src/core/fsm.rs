// src/core/fsm.rs
//
// The five-state onboarding-and-menu machine. States are a proper enum and
// every transition is explicit; termination is its own variant rather than a
// sentinel code.

use crate::{
    cli::prompt::Prompter,
    constants,
    core::{actions, env_loader, env_store::EnvStore},
    system::{executor::CommandRunner, git},
};
use anyhow::Result;
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Tool checks, dotenv load, credential selection.
    Start,
    /// Is the working directory already a repository?
    CheckRepo,
    /// Clone the configured repositories.
    Init,
    /// The re-entrant main menu.
    Menu,
    /// Farewell banner; the machine stops after this state runs.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next(State),
    Terminated,
}

const BANNER: &str = r"
+===========================================================+
|                                                           |
|                GITHUB VERSION CONTROL FSM                 |
|                                                           |
|  Tool Name: vcs-gh                                        |
|                                                           |
|  A finite-state CLI tool for automating and               |
|  linting Git/GitHub workflows                             |
|                                                           |
+===========================================================+
";

const FAREWELL: &str = r"
+===========================================================+
|                                                           |
|                  THANKS FOR USING vcs-gh                  |
|                                                           |
+===========================================================+
";

/// One interactive run of the workflow: the injected capabilities plus the
/// paths everything is resolved against.
pub struct Session<'a> {
    env: &'a mut dyn EnvStore,
    ui: &'a mut dyn Prompter,
    runner: &'a mut dyn CommandRunner,
    env_file: PathBuf,
    root: PathBuf,
    /// Where `.git-credentials` lives; `None` disables the cleanup.
    home: Option<PathBuf>,
}

impl<'a> Session<'a> {
    pub fn new(
        env: &'a mut dyn EnvStore,
        ui: &'a mut dyn Prompter,
        runner: &'a mut dyn CommandRunner,
        env_file: PathBuf,
        root: PathBuf,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            env,
            ui,
            runner,
            env_file,
            root,
            home,
        }
    }

    /// Drives the machine from `Start` until a state reports termination.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::Start;
        loop {
            log::debug!("entering state {:?}", state);
            match self.step(state)? {
                Transition::Next(next) => state = next,
                Transition::Terminated => return Ok(()),
            }
        }
    }

    /// Executes a single state and returns the transition it chose.
    pub fn step(&mut self, state: State) -> Result<Transition> {
        match state {
            State::Start => self.state_start(),
            State::CheckRepo => self.state_check_repo(),
            State::Init => self.state_init(),
            State::Menu => self.state_menu(),
            State::Exit => self.state_exit(),
        }
    }

    fn state_start(&mut self) -> Result<Transition> {
        self.ui.clear_screen();
        self.ui.say("Checking dependencies...");

        if !git::tool_available(self.runner, "git") {
            self.ui
                .say(&"Error: 'git' is not installed or not in PATH.".red().to_string());
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }
        if !git::tool_available(self.runner, "gh") {
            self.ui
                .say(&"Error: 'gh' (GitHub CLI) is not installed.".red().to_string());
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }

        if let Err(e) = env_loader::load_dotenv(&self.env_file, self.env, self.ui) {
            self.ui.say(&format!("{} {}", "Warning:".yellow(), e));
        }

        let usernames = self
            .env
            .get_list(constants::USERNAMES_KEY, constants::LIST_DELIMITERS);
        let emails = self
            .env
            .get_list(constants::EMAILS_KEY, constants::LIST_DELIMITERS);

        let (Some(usernames), Some(emails)) = (usernames, emails) else {
            return self.prompt_for_credential_lists();
        };

        if usernames.len() != emails.len() {
            self.ui.clear_screen();
            self.ui.say(
                &format!(
                    "Error: Mismatch between {} ({}) and {} ({}) count.",
                    constants::USERNAMES_KEY,
                    usernames.len(),
                    constants::EMAILS_KEY,
                    emails.len()
                )
                .red()
                .to_string(),
            );
            self.ui
                .say(&format!("Please fix '{}'.", self.env_file.display()));
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }

        let has_identity = git::config_get(self.runner, "user.name").is_some()
            && git::config_get(self.runner, "user.email").is_some();

        if has_identity {
            self.ui.clear_screen();
            self.ui.say("Current Git Global Configuration:");
            self.ui.say("-----------------------------------");
            let _ = git::show_global_config(self.runner);
            self.ui.say("-----------------------------------\n");
            if self.ui.confirm("Do you want to change credentials?", false)? {
                self.select_and_set_credentials(&usernames, &emails)?;
            } else {
                self.ui.say("Keeping current credentials.");
            }
        } else {
            self.ui.clear_screen();
            self.ui.say("Git global user.name or user.email is not set.");
            self.select_and_set_credentials(&usernames, &emails)?;
        }

        self.ui.status("Next: Checking if repository exists");
        self.ui.pause();
        Ok(Transition::Next(State::CheckRepo))
    }

    /// The credential lists are missing: collect them, write them back to the
    /// env file, and abort so the user relaunches with a valid config.
    fn prompt_for_credential_lists(&mut self) -> Result<Transition> {
        self.ui.clear_screen();
        self.ui.say(&format!(
            "No {} and {} found in '{}'.",
            constants::USERNAMES_KEY,
            constants::EMAILS_KEY,
            self.env_file.display()
        ));
        self.ui
            .say("Please provide git user information to create the config.\n");

        self.ui
            .say("Enter usernames (semicolon-separated, e.g., User1;User2;User3):");
        let usernames = self.ui.input(">")?;
        if usernames.trim().is_empty() {
            self.ui.say("No usernames provided. Exiting.");
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }

        self.ui.say(
            "Enter emails (semicolon-separated, e.g., user1@email.com;user2@email.com):",
        );
        let emails = self.ui.input(">")?;
        if emails.trim().is_empty() {
            self.ui.say("No emails provided. Exiting.");
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }

        match self.append_credential_lines(usernames.trim(), emails.trim()) {
            Ok(()) => {
                self.ui.say(&format!(
                    "\n'{}' updated with {} and {}.",
                    self.env_file.display(),
                    constants::USERNAMES_KEY,
                    constants::EMAILS_KEY
                ));
                self.ui.say(
                    "The program will now exit. Restart to continue with git credential setup.",
                );
            }
            Err(e) => {
                self.ui.say(&format!(
                    "{} could not write to '{}': {}",
                    "Error:".red().bold(),
                    self.env_file.display(),
                    e
                ));
            }
        }
        self.ui.pause();
        Ok(Transition::Next(State::Exit))
    }

    fn append_credential_lines(&mut self, usernames: &str, emails: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.env_file)?;
        writeln!(file, "{}=\"{}\"", constants::USERNAMES_KEY, usernames)?;
        writeln!(file, "{}=\"{}\"", constants::EMAILS_KEY, emails)?;
        Ok(())
    }

    fn select_and_set_credentials(
        &mut self,
        usernames: &[String],
        emails: &[String],
    ) -> Result<()> {
        let items: Vec<String> = usernames
            .iter()
            .zip(emails)
            .map(|(user, email)| format!("{} <{}>", user, email))
            .collect();
        let choice = self.ui.select("Select Git Credentials", &items)?;

        self.ui.say("\nSetting git credentials...");
        let home = self.home.as_deref();
        match git::set_credentials(self.runner, &usernames[choice], &emails[choice], home) {
            Ok(()) => self.ui.say("\nCredentials set successfully!"),
            Err(e) => self
                .ui
                .say(&format!("{} {}", "Failed to set credentials:".red(), e)),
        }
        Ok(())
    }

    fn state_check_repo(&mut self) -> Result<Transition> {
        if !self.root.join(".git").exists() {
            return Ok(Transition::Next(State::Init));
        }

        self.ui.clear_screen();
        self.ui.say("Repository already initialized (.git exists).");
        if self
            .ui
            .confirm("Create a nested git repository inside it?", false)?
        {
            self.ui.say("Proceeding to initialization...");
            self.ui.status("Next: Initializing nested repository");
            self.ui.pause();
            Ok(Transition::Next(State::Init))
        } else {
            self.ui.say("Skipping initialization.");
            self.ui.status("Next: Going to main menu");
            self.ui.pause();
            Ok(Transition::Next(State::Menu))
        }
    }

    fn state_init(&mut self) -> Result<Transition> {
        let urls = self
            .env
            .get_list(constants::URLS_KEY, constants::LIST_DELIMITERS);
        let names = self
            .env
            .get_list(constants::REPO_NAMES_KEY, constants::LIST_DELIMITERS);

        let (Some(urls), Some(names)) = (urls, names) else {
            self.ui.clear_screen();
            self.ui.say(
                &format!(
                    "Error: {} and {} not found in '{}'.",
                    constants::URLS_KEY,
                    constants::REPO_NAMES_KEY,
                    self.env_file.display()
                )
                .red()
                .to_string(),
            );
            self.ui.say("Please add, for example:");
            self.ui.say("URLS=\"https://github.com/you/app.git\"");
            self.ui.say("REPO_NAMES=\"app\"");
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        };

        if urls.len() != names.len() {
            self.ui.clear_screen();
            self.ui.say(
                &format!(
                    "Error: Mismatch between {} ({}) and {} ({}) count.",
                    constants::URLS_KEY,
                    urls.len(),
                    constants::REPO_NAMES_KEY,
                    names.len()
                )
                .red()
                .to_string(),
            );
            self.ui.say(&format!(
                "Please fix '{}' so they have the same number of elements.",
                self.env_file.display()
            ));
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }

        self.ui.clear_screen();
        self.ui.say(&format!(
            "Current directory: {}\n",
            dunce::simplified(&self.root).display()
        ));

        let all_cloned = names.iter().all(|name| self.root.join(name).exists());
        if all_cloned {
            self.ui.say("All repositories are already initialized.");
            self.ui
                .say(&format!("Found {} repositories:", names.len()));
            for (i, name) in names.iter().enumerate() {
                self.ui.say(&format!("  [{}] {}", i + 1, name));
            }
            self.ui.status("Next: Exiting");
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }

        self.ui
            .say(&format!("Found {} repositories to clone:", urls.len()));
        for (i, (url, name)) in urls.iter().zip(&names).enumerate() {
            let note = if self.root.join(name).exists() {
                " (already exists)"
            } else {
                ""
            };
            self.ui
                .say(&format!("  [{}] {} -> {}{}", i + 1, url, name, note));
        }

        if !self
            .ui
            .confirm("Clone all repositories into the current directory?", false)?
        {
            self.ui.say("Cloning cancelled.");
            self.ui.pause();
            return Ok(Transition::Next(State::Exit));
        }

        self.ui.clear_screen();
        self.ui.say("Cloning repositories...\n");
        let total = urls.len();
        for (i, (url, name)) in urls.iter().zip(&names).enumerate() {
            if self.root.join(name).exists() {
                self.ui.say(&format!(
                    "[{}/{}] {} already exists, skipping...",
                    i + 1,
                    total,
                    name
                ));
                continue;
            }
            self.ui
                .say(&format!("[{}/{}] Cloning {} into {}...", i + 1, total, url, name));
            if let Err(e) = git::clone(self.runner, url, name) {
                self.ui
                    .say(&format!("{} {}", "Clone failed:".red().bold(), e));
            }
        }

        self.ui.say("\nRepository initialization finished.");
        self.ui.status("Next: Exiting");
        self.ui.pause();
        Ok(Transition::Next(State::Exit))
    }

    fn state_menu(&mut self) -> Result<Transition> {
        self.ui.clear_screen();
        if let Some(branch) = git::current_branch(self.runner) {
            self.ui.say(&format!("Current branch: {}\n", branch));
        }

        let options: Vec<String> = [
            "Push   (Branch -> Commit -> PR)",
            "Fetch  (Reset -> Checkout)",
            "Exit",
            "Commit (Current Branch) - admin only",
            "Delete (Remove Branch) - admin only",
        ]
        .iter()
        .map(|option| option.to_string())
        .collect();

        let choice = self.ui.select("vcs-gh Git Helper", &options)?;
        let outcome = match choice {
            0 => actions::push(self.ui, self.runner),
            1 => actions::fetch(self.ui, self.runner),
            2 => return Ok(Transition::Next(State::Exit)),
            3 => actions::quick_commit(self.ui, self.runner),
            4 => actions::delete_branch(self.ui, self.runner),
            _ => unreachable!(),
        };

        // A failed action never kills the session; report it and re-enter the menu.
        if let Err(e) = outcome {
            self.ui
                .say(&format!("{} {}", "Action failed:".red().bold(), e));
            self.ui.pause();
        }
        Ok(Transition::Next(State::Menu))
    }

    fn state_exit(&mut self) -> Result<Transition> {
        self.ui.clear_screen();
        self.ui.say(BANNER);
        self.ui.status("Good bye");
        self.ui.say(FAREWELL);
        self.ui.pause();
        Ok(Transition::Terminated)
    }
}
