//! The `regrade` command: re-validate recorded runs with the current
//! rubric.
//!
//! Reads an existing results CSV, locates each run's YAML artifact under
//! the runs folder, validates it again, and writes a new CSV with the
//! grading columns replaced. Timing and token columns are carried over
//! unchanged; they come from the original run and do not change under a
//! new rubric.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::engine::record::{read_records, ResultsCsv};
use crate::rubric::{validate, Rubric};
use crate::workspace::{find_run_artifact, DEFAULT_OUTPUT_FILE};
use crate::EvalError;

/// Re-validate every row of `source_csv`, writing the result to
/// `output_csv`. Returns the number of rows written.
pub fn regrade_csv(
    source_csv: &Path,
    runs_dir: &Path,
    output_csv: &Path,
    rubric: &Rubric,
) -> Result<usize, EvalError> {
    let records = read_records(source_csv)?;
    let mut writer = ResultsCsv::create(output_csv)?;
    let mut written = 0;

    for mut record in records {
        let run_folder = runs_dir
            .join(&record.batch_id)
            .join(format!("run_{}", record.run_number));

        match find_run_artifact(&run_folder, DEFAULT_OUTPUT_FILE) {
            Some(yaml_path) => {
                let validation = validate(&yaml_path, rubric);
                record.apply_validation(&validation);
            }
            None => {
                record.passed = false;
                record.assertions_passed = 0;
                record.assertions_total = rubric.assertions_total();
                record.metrics_count = 0;
                record.benchmarks_found.clear();
                record.error_message = "Output YAML not found".to_string();
            }
        }

        writer.write(&record)?;
        written += 1;
    }

    Ok(written)
}

/// Command entry point.
pub fn execute(runs_dir: &Path, csv: Option<PathBuf>, output: Option<PathBuf>) -> Result<bool> {
    let source_csv = csv.unwrap_or_else(|| runs_dir.join("results.csv"));
    let output_csv = output.unwrap_or_else(|| runs_dir.join("regraded_results.csv"));

    let written = regrade_csv(&source_csv, runs_dir, &output_csv, &Rubric::default())?;
    info!(rows = written, output = %output_csv.display(), "regraded results written");
    println!("Regraded {} rows into {}", written, output_csv.display());
    Ok(true)
}
