//! olmo-eval CLI entry point
//!
//! Evaluation harness for grading model-card benchmark extraction runs.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use olmo_eval::cli::args::{Cli, Command};
use olmo_eval::commands;
use olmo_eval::commands::run::RunOptions;
use olmo_eval::config::HarnessConfig;
use olmo_eval::version;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let build = version::BuildInfo::current();
    tracing::debug!(version = build.version, commit = ?build.commit, "starting olmo-eval");

    let cli = Cli::parse();
    let no_color = cli.no_color;
    let config_path = cli.config.as_deref();

    let outcome = match cli.command {
        None => commands::run::execute(config_path, RunOptions::default(), no_color),
        Some(Command::Run {
            runs,
            output_file,
            model,
            csv,
            no_skills,
        }) => commands::run::execute(
            config_path,
            RunOptions {
                runs: Some(runs),
                output_file,
                model,
                csv,
                no_skills,
            },
            no_color,
        ),
        Some(Command::Grade {
            file,
            expected_source,
            min_benchmarks,
            format,
        }) => commands::grade::execute(&file, expected_source, min_benchmarks, format, no_color),
        Some(Command::Regrade {
            runs_dir,
            csv,
            output,
        }) => commands::regrade::execute(&runs_dir, csv, output),
        Some(Command::Summarize { folder, output }) => {
            let report_file = HarnessConfig::load_or_default(config_path)
                .map(|c| c.agent_report_file)
                .unwrap_or_else(|_| HarnessConfig::default().agent_report_file);
            commands::summarize::execute(folder, output, &report_file)
        }
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}
