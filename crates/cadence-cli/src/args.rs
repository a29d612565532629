use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Main command-line interface for the Cadence plan engine
///
/// Cadence keeps plans of ordered work items and executes them one item at
/// a time, recording each item's status as it goes. Plans can be managed
/// directly from the command line, executed with shell-command executors,
/// or exposed to AI assistants through an MCP (Model Context Protocol)
/// server.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Execute a plan item by item
    #[command(alias = "r")]
    Run(RunArgs),
    /// Start the MCP server
    Serve,
}

/// Plan management commands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan and make it active
    Create(CreateArgs),
    /// Replace a plan's title and/or items
    Update(UpdateArgs),
    /// List all plans
    List,
    /// Show a plan (the active plan by default)
    Show(ShowArgs),
    /// Make a plan the active plan
    Activate(IdArgs),
    /// Set an item's status and/or notes
    Mark(MarkArgs),
    /// Delete a plan
    Delete(IdArgs),
}

/// Item list given on the command line, from `--item` flags and/or a JSON
/// file.
#[derive(ClapArgs)]
pub struct ItemsArgs {
    /// Item content; repeat for several items
    #[arg(long = "item", value_name = "CONTENT")]
    pub items: Vec<String>,

    /// JSON file holding an array of items
    /// (`{"content", "tags", "media_prompt", "scheduled_time"}`)
    #[arg(long, value_name = "FILE")]
    pub items_file: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct CreateArgs {
    /// Unique plan ID
    pub id: String,

    /// Plan title
    pub title: String,

    #[command(flatten)]
    pub items: ItemsArgs,
}

#[derive(ClapArgs)]
pub struct UpdateArgs {
    /// ID of the plan to update
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub items: ItemsArgs,
}

#[derive(ClapArgs)]
pub struct ShowArgs {
    /// Plan ID; the active plan is shown when omitted
    pub id: Option<String>,
}

#[derive(ClapArgs)]
pub struct IdArgs {
    /// Plan ID
    pub id: String,
}

#[derive(ClapArgs)]
pub struct MarkArgs {
    /// Index of the item (0-based)
    #[arg(allow_negative_numbers = true)]
    pub index: i64,

    /// Plan ID; the active plan is used when omitted
    #[arg(long)]
    pub plan: Option<String>,

    /// New status: draft, ready, completed or failed
    #[arg(long)]
    pub status: Option<String>,

    /// Notes to record for the item
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(ClapArgs)]
pub struct RunArgs {
    /// Request to draft a new plan from. When omitted the existing plan
    /// is executed.
    pub request: Option<String>,

    /// Target plan ID. Defaults to the active plan when no request is
    /// given, otherwise to a timestamped ID.
    #[arg(long)]
    pub plan_id: Option<String>,

    /// Executor as KEY=COMMAND. The command receives the item prompt on
    /// stdin. Items are routed by kind (`text` or `media`); repeat for
    /// several executors.
    #[arg(
        long = "executor",
        value_name = "KEY=COMMAND",
        value_parser = parse_executor,
        required = true
    )]
    pub executors: Vec<(String, String)>,

    /// Fallback order of executor keys, comma separated
    #[arg(long, value_delimiter = ',')]
    pub executor_keys: Option<Vec<String>>,

    /// Executor key used for the closing summary. Defaults to the first
    /// executor.
    #[arg(long)]
    pub primary: Option<String>,

    /// Command that drafts plans and summaries. It receives a JSON request
    /// on stdin.
    #[arg(long, value_name = "COMMAND")]
    pub drafter: Option<String>,

    /// Per-item executor timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Stop after the first item whose output contains this text
    #[arg(long, value_name = "TEXT")]
    pub finish_marker: Option<String>,
}

/// Parses `KEY=COMMAND`.
fn parse_executor(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, command)) if !key.trim().is_empty() && !command.trim().is_empty() => {
            Ok((key.trim().to_string(), command.to_string()))
        }
        _ => Err(format!("expected KEY=COMMAND, got '{value}'")),
    }
}
