// src/core/report.rs

use crate::cli::prompt::Prompter;
use std::path::Path;

/// Prints a short startup report: executable, arguments, working directory.
/// Shown once before the state machine starts, unless suppressed.
pub fn startup_report(ui: &mut dyn Prompter, root: &Path) {
    ui.say("=== Startup Report ===");

    match std::env::current_exe() {
        Ok(exe) => ui.say(&format!("Executable : {}", dunce::simplified(&exe).display())),
        // Fall back to how the program was invoked.
        Err(_) => {
            if let Some(argv0) = std::env::args().next() {
                ui.say(&format!("Executable : {}", argv0));
            }
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        ui.say("Arguments  : (none)");
    } else {
        ui.say(&format!("Arguments  : {}", args.join(" ")));
    }

    ui.say(&format!(
        "Directory  : {}",
        dunce::simplified(root).display()
    ));
    ui.say("======================\n");

    ui.status("Starting");
    ui.pause();
}
