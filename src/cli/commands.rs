use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chipselect", about = concat!("chipselect v", env!("CARGO_PKG_VERSION"), " - pick many from a list, as chips"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Candidate list (.json array or .toml with [[options]]); defaults to the built-in mock list
    #[arg(short = 'o', long = "options", global = true)]
    pub options: Option<PathBuf>,

    /// Config file (default: ./chipselect.toml when present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Append logs to this file (the picker itself never logs to the terminal)
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List candidates, optionally filtered by a query
    List(ListArgs),
    /// Validate the candidate list (labels non-empty and unique)
    Check,
    /// Drive the picker headlessly and print every selection notification
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Literal, case-sensitive substring matched against label and value
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Steps: focus, blur, wait <ms>, type <text>, backspace, up, down, enter,
    /// pick <label>, dismiss <label>
    pub steps: Vec<String>,
    /// Read steps from a file, one per line (run before positional steps)
    #[arg(long)]
    pub script: Option<PathBuf>,
}
