// src/core/actions.rs
//
// The four menu actions. Each one is a linear flow over the prompter and the
// command runner; any command failure propagates so the menu can report it.

use crate::{
    cli::prompt::Prompter,
    constants,
    models::{self, SCOPES, SEMANTIC_TYPES},
    system::{executor::CommandRunner, git},
};
use anyhow::Result;

/// Branch -> commit -> push -> pull request.
pub fn push(ui: &mut dyn Prompter, runner: &mut dyn CommandRunner) -> Result<()> {
    ui.clear_screen();
    ui.say("Create a new branch and open a pull request.\n");

    let branch = ui.input("New branch name (empty to cancel)")?;
    let branch = branch.trim();
    if branch.is_empty() {
        ui.say("Cancelled.");
        ui.pause();
        return Ok(());
    }

    git::checkout_new_branch(runner, branch)?;
    git::add_all(runner)?;

    let type_items = models::semantic_type_menu_items();
    let type_choice = ui.select("Select commit type", &type_items)?;
    let semantic_type = SEMANTIC_TYPES[type_choice].0;

    let scope_items: Vec<String> = SCOPES.iter().map(|scope| scope.to_string()).collect();
    let scope_choice = ui.select("Select scope", &scope_items)?;
    let scope = SCOPES[scope_choice];

    let title = ui.input("Commit title")?;
    let message = models::format_commit_title(semantic_type, scope, title.trim());

    git::commit(runner, &message)?;
    git::push_upstream(runner, branch)?;
    git::create_pull_request(runner, &message, "Auto-generated pull request")?;

    ui.status("Pull request created");
    ui.pause();
    Ok(())
}

/// Snapshot local work, reset the local branch list to the remote, and check
/// out a branch.
pub fn fetch(ui: &mut dyn Prompter, runner: &mut dyn CommandRunner) -> Result<()> {
    ui.clear_screen();
    ui.say("Snapshotting local changes before fetch...\n");

    git::snapshot_branch(runner, constants::SNAPSHOT_BRANCH)?;
    git::add_all(runner)?;
    git::snapshot_commit(runner, constants::SNAPSHOT_BRANCH)?;
    ui.say(&format!(
        "Local state saved on '{}'.",
        constants::SNAPSHOT_BRANCH
    ));
    ui.pause();

    git::fetch_prune(runner)?;
    git::prune_local_branches(runner, constants::SNAPSHOT_BRANCH)?;

    ui.say("\nRemote branches:");
    git::show_remote_branches(runner)?;
    ui.say("\nLocal branches:");
    git::show_local_branches(runner)?;

    let branch = ui.input("Branch to checkout (empty for the remote default)")?;
    let branch = branch.trim();
    let target = if branch.is_empty() {
        git::remote_default_branch(runner)?
    } else {
        branch.to_string()
    };
    git::checkout(runner, &target)?;

    ui.status(&format!("Checked out '{}'", target));
    ui.pause();
    Ok(())
}

/// Commit everything on the current branch and push it. Admin shortcut, no
/// branch or pull request ceremony.
pub fn quick_commit(ui: &mut dyn Prompter, runner: &mut dyn CommandRunner) -> Result<()> {
    ui.clear_screen();
    git::add_all(runner)?;

    let message = ui.input("Commit message")?;
    let message = message.trim();
    if message.is_empty() {
        ui.say("Aborted (empty message).");
        ui.pause();
        return Ok(());
    }

    git::commit(runner, message)?;
    git::push_head(runner)?;

    ui.status("Committed and pushed");
    ui.pause();
    Ok(())
}

/// Delete a branch on the remote, after a confirmation.
pub fn delete_branch(ui: &mut dyn Prompter, runner: &mut dyn CommandRunner) -> Result<()> {
    ui.clear_screen();
    git::fetch_prune(runner)?;
    git::prune_local_branches(runner, constants::SNAPSHOT_BRANCH)?;

    ui.say("Remote branches:");
    git::show_remote_branches(runner)?;

    let branch = ui.input("Remote branch to delete (empty to cancel)")?;
    let branch = branch.trim();
    if branch.is_empty() {
        ui.say("Cancelled.");
        ui.pause();
        return Ok(());
    }

    if !ui.confirm(
        &format!("Really delete remote branch '{}'?", branch),
        false,
    )? {
        ui.say("Cancelled.");
        ui.pause();
        return Ok(());
    }

    git::delete_remote_branch(runner, branch)?;
    ui.status(&format!("Deleted '{}'", branch));
    ui.pause();
    Ok(())
}
