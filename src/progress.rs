//! Terminal progress and confirmation for the lifecycle executor

use anyhow::{Context, Result};
use colored::Colorize;
use lifecycle::{Address, ApplyResult, ConfirmCallback, PlannedAction, ProgressCallback};

/// Prints one line per applied change
pub struct TerminalProgress {
    pub quiet: bool,
}

impl ProgressCallback for TerminalProgress {
    fn on_start(&mut self, count: usize) {
        if !self.quiet {
            println!();
            println!(
                "  {} Applying {}...",
                "→".cyan(),
                crate::ui::count(count, "change")
            );
        }
    }

    fn on_resource_start(&mut self, address: &Address, action: PlannedAction) {
        let verb = match action {
            PlannedAction::Create => "Creating",
            PlannedAction::Update => "Modifying",
            PlannedAction::Delete => "Destroying",
            PlannedAction::NoChange => return,
        };
        log::info!("{verb} {address}");
    }

    fn on_resource_complete(&mut self, address: &Address, result: &ApplyResult) {
        match result {
            ApplyResult::Created => println!("  {} {} created", "✓".green(), address),
            ApplyResult::Updated => println!("  {} {} modified", "✓".green(), address),
            ApplyResult::Deleted => println!("  {} {} destroyed", "✓".green(), address),
            ApplyResult::NoChange => {}
            ApplyResult::Skipped { reason } => {
                println!("  {} {} skipped: {}", "○".dimmed(), address, reason);
            }
            ApplyResult::Failed { error } => {
                println!("  {} {} failed: {}", "✗".red(), address, error);
            }
        }
    }

    fn on_complete(&mut self) {}
}

/// Asks on the terminal unless `--yes` was given
pub struct PromptConfirm {
    pub assume_yes: bool,
}

impl ConfirmCallback for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        println!();
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }
}
