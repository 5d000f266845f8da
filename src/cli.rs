//! CLI interface for the resume scanner

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-scanner")]
#[command(about = "Resume and job description compatibility scanner")]
#[command(
    long_about = "Score resume compatibility with job descriptions using keyword extraction, category coverage, and knowledge-graph skill augmentation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a resume against a job description
    Analyze {
        /// Path to resume file (PDF or DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a job description text file
        #[arg(
            short,
            long,
            required_unless_present = "job_text",
            conflicts_with = "job_text"
        )]
        job: Option<PathBuf>,

        /// Job description text passed inline
        #[arg(long, value_name = "TEXT")]
        job_text: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip knowledge-graph skill augmentation
        #[arg(long)]
        no_augment: bool,
    },

    /// Show the active category taxonomy
    Taxonomy {
        /// Show a single category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}
