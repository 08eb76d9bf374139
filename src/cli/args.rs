//! Command line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Evaluation harness for grading model-card benchmark extraction runs.
#[derive(Debug, Parser)]
#[command(name = "olmo-eval", version, long_version = crate::version::long_version(), about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (defaults to olmo-eval.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a batch of evaluation runs (default)
    Run {
        /// Number of iterations to run
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Name of the output YAML file to validate
        #[arg(long, value_name = "FILE")]
        output_file: Option<String>,
        /// Model override forwarded to the agent command
        #[arg(long)]
        model: Option<String>,
        /// Results CSV path
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Skip cloning the skills repository
        #[arg(long)]
        no_skills: bool,
    },
    /// Grade one YAML artifact against the rubric
    Grade {
        /// Artifact to validate
        file: PathBuf,
        /// Override the expected source URL fragment
        #[arg(long, value_name = "SUBSTRING")]
        expected_source: Option<String>,
        /// Override the minimum expected-benchmark coverage
        #[arg(long, value_name = "N")]
        min_benchmarks: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = GradeFormat::Text)]
        format: GradeFormat,
    },
    /// Re-validate existing runs from the results CSV with the current rubric
    Regrade {
        /// Runs folder holding batch artifacts
        #[arg(long, default_value = "runs", value_name = "DIR")]
        runs_dir: PathBuf,
        /// Source results CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Regraded CSV to write
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Walk a runs folder and write a fresh results CSV
    Summarize {
        /// Runs folder to walk (defaults to runs/)
        folder: Option<PathBuf>,
        /// CSV to write
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Output format for the grade command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GradeFormat {
    /// Human-readable terminal output
    Text,
    /// Machine-readable JSON
    Json,
}
