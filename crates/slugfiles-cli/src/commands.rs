use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "slugfiles", version)]
#[command(about = "Rename files in a directory to user friendly slugs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rename files in a directory to user friendly slugs
    Rename(RenameArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Folder whose files should be renamed
    pub path: PathBuf,
    /// Copy slugged files into this directory instead of renaming in place
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
    /// Recurse into subdirectories and rename the directories too
    #[arg(short, long)]
    pub recursive: bool,
    /// Keep upper case letters when slugging
    #[arg(short, long)]
    pub case_sensitive: bool,
    /// Report what would change without touching the filesystem
    #[arg(short, long)]
    pub dry_run: bool,
}
