//! The `run` command: execute a batch of evaluation runs.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::agent::CommandAgent;
use crate::cli::output::{format_batch_summary, Painter};
use crate::config::HarnessConfig;
use crate::engine::BatchRunner;

/// CLI overrides layered on top of the configuration file.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub runs: Option<u32>,
    pub output_file: Option<String>,
    pub model: Option<String>,
    pub csv: Option<PathBuf>,
    pub no_skills: bool,
}

/// Execute a batch; returns true when every run passed.
pub fn execute(config_path: Option<&Path>, options: RunOptions, no_color: bool) -> Result<bool> {
    let mut config = HarnessConfig::load_or_default(config_path)?;
    if let Some(runs) = options.runs {
        config.runs = runs;
    }
    if let Some(output_file) = options.output_file {
        config.output_file = output_file;
    }
    if let Some(model) = options.model {
        config.model = Some(model);
    }
    if let Some(csv) = options.csv {
        config.csv_path = csv;
    }
    if options.no_skills {
        config.use_skills = false;
    }

    let agent = CommandAgent::new(
        config.agent_command.clone(),
        config.agent_args.clone(),
        config.agent_report_file.clone(),
        config.model.clone(),
    );
    let runner = BatchRunner::new(&config, &agent);
    let outcome = runner.run_batch()?;

    let painter = Painter::new(!no_color);
    println!("{}", format_batch_summary(&outcome, &painter));

    Ok(outcome.passed_count() == outcome.records.len())
}
