use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dbk", about = concat!("[#] daybook v", env!("CARGO_PKG_VERSION"), " - your diary, encrypted"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List entries, newest first
    List(ListArgs),
    /// Print an entry's content
    Show(ShowArgs),
    /// Create a new empty entry
    New,
    /// Delete an entry
    Delete(DeleteArgs),
    /// List entries whose title matches a term
    Search(SearchArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Keep only titles containing this term (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Entry id (YYYY-MM-DD_HH-MM-SS)
    pub id: String,
    /// Highlight occurrences of this term in the output
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Entry id (YYYY-MM-DD_HH-MM-SS)
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Term to match against entry titles (case-insensitive)
    pub term: String,
}
