use clap::{Args, Parser, Subcommand};
use resume_match_common::{ClassificationMode, TierFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-match")]
#[command(about = "Match resume text files against a catalog of opportunities", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command that runs the matcher
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Folder of resume text files
    #[arg(required = true)]
    pub folder: PathBuf,

    /// Catalog JSON file
    #[arg(short, long, conflicts_with = "preset")]
    pub catalog: Option<PathBuf>,

    /// Built-in catalog (outreachy-2017-orgs/outreachy-2017-projects)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Tiers to count and shortlist from (gold/gold-silver)
    #[arg(short, long)]
    pub tier: Option<TierFilter>,

    /// How tiers are decided (best/all-required)
    #[arg(short, long)]
    pub mode: Option<ClassificationMode>,

    /// Stop at the first unreadable resume instead of skipping it
    #[arg(long)]
    pub abort_on_error: bool,

    /// Scan subfolders too
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Resume file extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Write the result as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match resumes and report tiers and keyword hit counts
    Match {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Build per-organization shortlists
    Recommend {
        #[command(flatten)]
        run: RunArgs,

        /// Organization to shortlist (repeatable; default: all)
        #[arg(long = "org")]
        organizations: Vec<String>,
    },

    /// Find resumes that mention an email address
    Lookup {
        /// Folder of resume text files
        #[arg(required = true)]
        folder: PathBuf,

        /// Address to look for
        #[arg(short, long)]
        email: String,

        /// Scan subfolders too
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// Show or edit settings
    Config {
        /// Show settings
        #[arg(long)]
        show: bool,

        /// Default catalog preset
        #[arg(long)]
        set_preset: Option<String>,
    },
}
