use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::task::TaskId;

#[derive(Parser)]
#[command(name = "ctd", about = concat!("chaos-todo v", env!("CARGO_PKG_VERSION"), " - a small local task list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different store file
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task at the top of the list
    Add(AddArgs),
    /// Flip a task between active and completed
    Toggle(IdArgs),
    /// Delete a task
    Delete(DeleteArgs),
    /// Delete every completed task
    Clear(ClearArgs),
    /// List tasks
    List(FilterArgs),
    /// Show task statistics
    Stats,
    /// Print the list as HTML
    Html(FilterArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Priority (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    pub priority: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: TaskId,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    pub id: TaskId,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Filter (all, active, completed, high)
    #[arg(long, default_value = "all")]
    pub filter: String,
}
