use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docket", about = concat!("docket v", env!("CARGO_PKG_VERSION"), " - projects, tasks, and progress at a glance"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./docket.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON data set to load instead of the built-in seed
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Write log events to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects, optionally filtered
    List(ListArgs),
    /// Show one project with its tasks
    Show(ShowArgs),
    /// Show aggregate statistics
    Stats,
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against name, description, and category
    #[arg(long)]
    pub search: Option<String>,
    /// Filter by priority (all, low, medium, high, critical)
    #[arg(long)]
    pub priority: Option<String>,
    /// Filter by status (all, planning, pending, in-progress, completed)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project ID to show
    pub id: u32,
    /// Only tasks with this status (all, pending, in-progress, completed)
    #[arg(long)]
    pub status: Option<String>,
}
