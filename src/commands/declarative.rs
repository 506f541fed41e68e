//! Declarative commands
//!
//! - `plan` - Preview what apply would change
//! - `apply` - Create/update/delete records to match the config
//! - `destroy` - Delete tracked records
//! - `show` - Print tracked records

use anyhow::{Result, bail};
use colored::Colorize;
use lifecycle::{
    Address, ExecuteOptions, ExecuteSummary, Plan, PlannedAction, Provider, Records, StringValue,
    execute, matches_target, plan_changes, refresh,
};
use std::collections::BTreeMap;

use crate::Context;
use crate::cli::{ApplyArgs, DestroyArgs, ShowArgs, TargetArgs};
use crate::progress::{PromptConfirm, TerminalProgress};
use crate::ui;
use notnull::config::Config;
use notnull::provider::new_provider;
use notnull::state::StateFile;

/// Loaded state plus the provider that owns its records
struct Session {
    provider: Provider,
    state: StateFile,
    records: Records,
}

impl Session {
    /// Load and refresh the state file
    fn open(ctx: &Context) -> Result<Self> {
        let provider = new_provider();
        let state = StateFile::load(&ctx.state_path)?;
        let mut records = state.records()?;
        refresh(&provider, &mut records)?;
        Ok(Self {
            provider,
            state,
            records,
        })
    }

    /// Write records back if anything changed
    fn persist(&mut self, ctx: &Context) -> Result<()> {
        if self.state.set_records(&self.records)? {
            self.state.save(&ctx.state_path)?;
            log::info!(
                "State saved to {} (serial {})",
                ctx.state_path.display(),
                self.state.serial
            );
        }
        Ok(())
    }
}

pub fn plan(ctx: &Context, args: TargetArgs) -> Result<()> {
    ui::header("Plan");

    let session = Session::open(ctx)?;
    let config = Config::load(&ctx.config_path)?;
    let plan = plan_changes(&session.provider, &config.records(), &session.records)?
        .filter_by_target(args.target.as_deref());

    display_plan(&plan);
    Ok(())
}

pub fn apply(ctx: &Context, args: ApplyArgs) -> Result<()> {
    ui::header("Applying Configuration");

    if args.dry_run {
        ui::warn("Dry run - no changes will be made");
    }

    let mut session = Session::open(ctx)?;
    let config = Config::load(&ctx.config_path)?;
    let plan = plan_changes(&session.provider, &config.records(), &session.records)?
        .filter_by_target(args.target.as_deref());

    run(ctx, &mut session, &plan, args.dry_run, args.yes)
}

pub fn destroy(ctx: &Context, args: DestroyArgs) -> Result<()> {
    ui::header("Destroying Records");

    let mut session = Session::open(ctx)?;
    let plan = plan_changes(&session.provider, &Records::new(), &session.records)?
        .filter_by_target(args.target.as_deref());

    run(ctx, &mut session, &plan, false, args.yes)
}

/// Display, confirm, execute and persist a plan
fn run(ctx: &Context, session: &mut Session, plan: &Plan, dry_run: bool, yes: bool) -> Result<()> {
    display_plan(plan);

    if !plan.has_changes() {
        return session.persist(ctx);
    }

    let opts = ExecuteOptions { dry_run };
    let summary = execute(
        &session.provider,
        plan,
        &mut session.records,
        &opts,
        &mut TerminalProgress { quiet: ctx.quiet },
        &mut PromptConfirm { assume_yes: yes },
    )?;

    session.persist(ctx)?;
    display_summary(&summary, plan, dry_run);

    if !summary.is_success() {
        bail!("{} failed", ui::count(summary.failed, "resource"));
    }
    Ok(())
}

pub fn show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let mut session = Session::open(ctx)?;
    session.persist(ctx)?;

    let filter = args.target.as_deref();
    let selected: BTreeMap<String, _> = session
        .records
        .iter()
        .filter(|(address, _)| selected(address, filter))
        .map(|(address, attrs)| (address.to_string(), attrs))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    ui::header("Tracked Records");
    if selected.is_empty() {
        ui::dim("No records tracked");
        return Ok(());
    }

    for (address, attrs) in &selected {
        ui::section(address);
        for (name, value) in attrs.iter() {
            ui::kv(name, &value.to_string());
        }
    }
    Ok(())
}

fn selected(address: &Address, target: Option<&str>) -> bool {
    target.is_none_or(|t| matches_target(address, t))
}

// ============================================================================
// Display
// ============================================================================

fn display_plan(plan: &Plan) {
    for warning in plan.warnings.warnings() {
        ui::warn(&warning.to_string());
    }

    if !plan.has_changes() {
        println!();
        println!(
            "  {} No changes. Records match the configuration.",
            "✓".green()
        );
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Planned Changes".bold()
    );
    println!("│");

    for change in plan.pending() {
        let symbol = match change.action {
            PlannedAction::Create => "+".green(),
            PlannedAction::Update => "~".yellow(),
            PlannedAction::Delete => "-".red(),
            PlannedAction::NoChange => " ".normal(),
        };
        let verb = match change.action {
            PlannedAction::Create => "will be created",
            PlannedAction::Update => "will be updated in-place",
            PlannedAction::Delete => "will be destroyed",
            PlannedAction::NoChange => "",
        };
        println!(
            "│ {} {} {}",
            symbol,
            change.address.to_string().bold(),
            verb.dimmed()
        );

        for diff in change.attribute_diffs() {
            let line = match change.action {
                PlannedAction::Create => {
                    format!("{:<15} = {}", diff.name, describe(&diff.after))
                }
                PlannedAction::Delete => {
                    format!("{:<15} = {}", diff.name, describe(&diff.before))
                }
                _ => format!(
                    "{:<15} = {} → {}",
                    diff.name,
                    describe(&diff.before),
                    describe(&diff.after)
                ),
            };
            println!("│     {} {}", change.action.symbol(), line);
        }
        println!("│");
    }

    let summary = plan.summary();
    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Plan: {} to add, {} to change, {} to destroy",
        summary.create.to_string().green(),
        summary.update.to_string().yellow(),
        summary.delete.to_string().red()
    );
    println!("└─────────────────────────────────────────────────────┘");
}

fn describe(value: &StringValue) -> String {
    match value {
        StringValue::Null => "null".dimmed().to_string(),
        StringValue::Unknown => "(known after apply)".dimmed().to_string(),
        StringValue::Known(s) => format!("{s:?}"),
    }
}

fn display_summary(summary: &ExecuteSummary, plan: &Plan, dry_run: bool) {
    println!();
    if dry_run {
        ui::info(&format!(
            "Dry run - {} not applied",
            ui::count(plan.summary().total(), "change")
        ));
        return;
    }

    if summary.skipped > 0 && summary.total_changes() == 0 {
        ui::warn("Aborted - no changes made");
        return;
    }

    let line = format!(
        "{} added, {} changed, {} destroyed",
        summary.created, summary.updated, summary.deleted
    );
    if summary.is_success() {
        ui::success(&format!("Apply complete! {line}"));
    } else {
        ui::error(&format!(
            "Apply finished with errors: {line}, {} failed",
            summary.failed
        ));
    }
}
