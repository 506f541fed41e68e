use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notnull")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Plan and apply sticky non-null values", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ./notnull.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// State file (default: <state dir>/state.json)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what apply would change
    Plan(TargetArgs),

    /// Create, update or delete records to match the config
    Apply(ApplyArgs),

    /// Delete tracked records
    Destroy(DestroyArgs),

    /// Show tracked records
    Show(ShowArgs),

    /// Print resource schemas
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the result resolver directly
    Resolve(ResolveArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Lifecycle
// ============================================================================

#[derive(Args)]
pub struct TargetArgs {
    /// Only consider a resource type or a single address (type.name)
    pub target: Option<String>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Only consider a resource type or a single address (type.name)
    pub target: Option<String>,

    /// Dry run - show what would be done
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct DestroyArgs {
    /// Only consider a resource type or a single address (type.name)
    pub target: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Only show a resource type or a single address (type.name)
    pub target: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Resolve
// ============================================================================

#[derive(Args)]
pub struct ResolveArgs {
    /// Primary value
    #[arg(long, conflicts_with = "unknown")]
    pub value: Option<String>,

    /// Treat the primary value as not yet known
    #[arg(long)]
    pub unknown: bool,

    /// Default value
    #[arg(long = "default")]
    pub default_value: Option<String>,

    /// Prior result
    #[arg(long)]
    pub prior: Option<String>,
}
