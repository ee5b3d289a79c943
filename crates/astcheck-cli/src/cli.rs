use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "astcheck",
    about = "astcheck: structural conformance checking between two parsers' ASTs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that a target tree conforms to a reference tree
    Compare(CompareArgs),
    /// Print the subtree at a dotted path
    Locate(LocateArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Reference tree (JSON)
    pub reference: PathBuf,
    /// Target tree (JSON)
    pub target: PathBuf,
    /// TOML file with [compare] and [report] sections
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Top-level key to drop from both trees before comparing (repeatable)
    #[arg(long = "ignore")]
    pub ignore: Vec<String>,
    /// Trailing path segments to drop when showing context
    #[arg(long)]
    pub depth_budget: Option<usize>,
    #[arg(long)]
    pub reference_label: Option<String>,
    #[arg(long)]
    pub target_label: Option<String>,
    /// Recursion limit for the comparison
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Omit the line diff from the report
    #[arg(long)]
    pub no_diff: bool,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Tree (JSON)
    pub tree: PathBuf,
    /// Dotted path, e.g. body.0.expression
    #[arg(default_value = "")]
    pub path: String,
    /// Trailing path segments to drop
    #[arg(long, default_value = "0")]
    pub trim: usize,
    /// Levels of nesting to expand
    #[arg(long, default_value = "3")]
    pub depth: usize,
}
