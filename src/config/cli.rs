use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "snuintern")]
#[command(about = "Applicant profile and bookmarks client for the internship board")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service base URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token for the applicant session
    #[arg(long, env = "SNUINTERN_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or edit the applicant profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// List bookmarked postings with their deadlines
    Bookmarks,

    /// Show the profile summary from the my-page info tab
    Me,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Load the stored profile into the form and print it
    Show,

    /// Edit the profile form and submit it
    Save(SaveArgs),
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Two-digit student ID year (e.g. 23)
    #[arg(long)]
    pub enroll_year: Option<String>,

    /// Department entries, replacing the stored list (repeat up to 7 times)
    #[arg(long = "department")]
    pub departments: Vec<String>,

    /// PDF CV to attach (at most 5MB)
    #[arg(long, conflicts_with = "clear_cv")]
    pub cv: Option<PathBuf>,

    /// Discard the stored CV
    #[arg(long)]
    pub clear_cv: bool,
}
