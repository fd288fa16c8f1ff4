use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "derivapp")]
#[command(about = "Risk scoring for school referral cases", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colors and emoji
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single list of follow-up outcomes
    Score {
        /// Follow-up outcomes (positive, neutral, pending, negative); others are ignored
        outcomes: Vec<String>,

        /// Case priority (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Case status (open, closed)
        #[arg(short, long, default_value = "open")]
        status: String,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Score every case in a JSON export
    Assess {
        /// JSON file with an array of cases or {"cases": [...]}
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hide cases below this alert level (none_low, moderate, high, critical)
        #[arg(long = "min-level")]
        min_level: Option<String>,

        /// Show only the top N cases
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,
    },

    /// Write a default .derivapp.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
