//! The `summarize` command: rebuild a results CSV from run artifacts.
//!
//! Walks `runs/<batch_id>/run_<n>/` folders, re-validates each run's
//! YAML output, folds in any persisted agent report, and writes a fresh
//! CSV. Useful after grading changes or when the original CSV is lost.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::agent::AgentReport;
use crate::engine::record::{ResultsCsv, RunRecord};
use crate::rubric::{validate, Rubric};
use crate::workspace::{find_run_artifact, DEFAULT_OUTPUT_FILE};
use crate::EvalError;

/// Walk `runs_dir` and write one row per run folder found. Returns the
/// number of rows written.
pub fn summarize_runs(
    runs_dir: &Path,
    output_csv: &Path,
    agent_report_file: &str,
    rubric: &Rubric,
) -> Result<usize, EvalError> {
    let mut writer = ResultsCsv::create(output_csv)?;
    let mut written = 0;

    for (batch_id, batch_folder) in batch_folders(runs_dir)? {
        for (run_number, run_folder) in run_folders(&batch_folder) {
            let mut record =
                RunRecord::new(&batch_id, run_number, rubric.assertions_total(), String::new());

            // Persisted conversation report, when the framework left one.
            let report_path = run_folder.join("workspace").join(agent_report_file);
            if let Ok(text) = fs::read_to_string(&report_path) {
                if let Ok(report) = serde_json::from_str::<AgentReport>(&text) {
                    record.apply_report(&report);
                }
            }

            match find_run_artifact(&run_folder, DEFAULT_OUTPUT_FILE) {
                Some(yaml_path) => {
                    let validation = validate(&yaml_path, rubric);
                    record.apply_validation(&validation);
                }
                None => {
                    record.error_message = "Output YAML not found".to_string();
                }
            }

            writer.write(&record)?;
            written += 1;
        }
    }

    Ok(written)
}

/// Batch folders sorted by name (timestamped ids sort chronologically).
fn batch_folders(runs_dir: &Path) -> Result<Vec<(String, PathBuf)>, EvalError> {
    let entries = fs::read_dir(runs_dir).map_err(|e| EvalError::io("read runs folder", e))?;
    let mut batches: Vec<(String, PathBuf)> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .filter_map(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| (n.to_string(), p.clone()))
        })
        .collect();
    batches.sort();
    Ok(batches)
}

/// `run_<n>` folders sorted by run number.
fn run_folders(batch_folder: &Path) -> Vec<(u32, PathBuf)> {
    let entries = match fs::read_dir(batch_folder) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    let mut runs: Vec<(u32, PathBuf)> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .filter_map(|p| {
            let number = p
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix("run_"))
                .and_then(|n| n.parse().ok())?;
            Some((number, p.clone()))
        })
        .collect();
    runs.sort_by_key(|(number, _)| *number);
    runs
}

/// Command entry point.
pub fn execute(folder: Option<PathBuf>, output: Option<PathBuf>, report_file: &str) -> Result<bool> {
    let runs_dir = folder.unwrap_or_else(|| PathBuf::from("runs"));
    let output_csv = output.unwrap_or_else(|| runs_dir.join("summarized_results.csv"));

    let written = summarize_runs(&runs_dir, &output_csv, report_file, &Rubric::default())?;
    info!(rows = written, output = %output_csv.display(), "summary written");
    println!("Summarized {} runs into {}", written, output_csv.display());
    Ok(true)
}
