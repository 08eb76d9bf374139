//! Batch runner.
//!
//! # Graceful Degradation
//!
//! - Workspace/skills staging failure: recorded in the run's row, batch
//!   continues with the next run.
//! - Agent launch failure: same.
//! - Missing artifact: graded as a validation failure (zero assertions),
//!   not a runner error.
//! - CSV write failure: aborts the batch; nothing sensible can be
//!   recorded without the results table.

use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{error, info};

use crate::agent::{Agent, AgentReport};
use crate::config::HarnessConfig;
use crate::engine::record::{ResultsCsv, RunRecord};
use crate::rubric::{validate, Rubric};
use crate::skills::{
    clone_skills_repo, copy_skill_runtime_assets, find_skill_manifest, prepare_skills_directory,
};
use crate::workspace::{
    batch_id_now, collect_stray_artifacts, copy_prompt_assets, recover_output_file, RunLayout,
};
use crate::EvalError;

/// Outcome of a whole batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub batch_id: String,
    pub batch_folder: std::path::PathBuf,
    pub csv_path: std::path::PathBuf,
    pub records: Vec<RunRecord>,
}

impl BatchOutcome {
    pub fn passed_count(&self) -> usize {
        self.records.iter().filter(|r| r.passed).count()
    }
}

/// Executes batches of evaluation runs against one agent.
pub struct BatchRunner<'a> {
    config: &'a HarnessConfig,
    agent: &'a dyn Agent,
}

impl<'a> BatchRunner<'a> {
    pub fn new(config: &'a HarnessConfig, agent: &'a dyn Agent) -> Self {
        BatchRunner { config, agent }
    }

    /// Run the configured number of iterations, appending each row to
    /// the stable results CSV as it completes.
    pub fn run_batch(&self) -> Result<BatchOutcome, EvalError> {
        let batch_id = batch_id_now();
        let batch_folder = self.config.runs_dir.join(&batch_id);
        fs::create_dir_all(&batch_folder).map_err(|e| EvalError::io("create batch folder", e))?;

        info!(
            batch_id = %batch_id,
            runs = self.config.runs,
            csv = %self.config.csv_path.display(),
            "starting evaluation batch"
        );

        let mut csv = ResultsCsv::append(&self.config.csv_path)?;
        let mut records = Vec::with_capacity(self.config.runs as usize);

        for run_number in 1..=self.config.runs {
            let record = self.run_once(&batch_id, &batch_folder, run_number);
            info!(
                run = run_number,
                passed = record.passed,
                assertions = %format!("{}/{}", record.assertions_passed, record.assertions_total),
                "run complete"
            );
            csv.write(&record)?;
            records.push(record);
        }

        Ok(BatchOutcome {
            batch_id,
            batch_folder,
            csv_path: self.config.csv_path.clone(),
            records,
        })
    }

    /// One full run. Never fails; errors become the row's error message.
    fn run_once(&self, batch_id: &str, batch_folder: &Path, run_number: u32) -> RunRecord {
        let rubric = Rubric::default();
        let mut record = RunRecord::new(
            batch_id,
            run_number,
            rubric.assertions_total(),
            Local::now().to_rfc3339(),
        );
        let layout = RunLayout::new(batch_folder, run_number);

        match self.execute_run(&layout) {
            Ok(report) => {
                record.apply_report(&report);
                let output_path = layout.workspace.join(&self.config.output_file);
                let validation = validate(&output_path, &rubric);
                record.apply_validation(&validation);
            }
            Err(e) => {
                error!(run = run_number, error = %e, "run failed before grading");
                record.error_message = e.to_string();
            }
        }

        // Agents occasionally drop artifacts in the harness root; sweep
        // them into the run folder so runs stay reproducible.
        match collect_stray_artifacts(&self.config.prompt_dir, &layout.run_folder) {
            Ok(moved) if !moved.is_empty() => {
                info!(?moved, "collected stray artifacts from harness root");
            }
            _ => {}
        }

        record
    }

    fn execute_run(&self, layout: &RunLayout) -> Result<AgentReport, EvalError> {
        layout.create()?;
        copy_prompt_assets(&self.config.prompt_dir, &layout.workspace)?;

        if self.config.use_skills {
            clone_skills_repo(
                &self.config.skills_repo_url,
                &self.config.skills_repo_commit,
                &layout.skills_repo,
            )?;
            let manifest = find_skill_manifest(&layout.skills_repo)?;
            prepare_skills_directory(&manifest, &layout.skills_filtered)?;
            if let Some(skill_dir) = manifest.parent() {
                copy_skill_runtime_assets(skill_dir, &layout.workspace)?;
            }
        }

        let report = self.agent.run_task(&layout.workspace)?;
        recover_output_file(&layout.workspace, &layout.skills_repo, &self.config.output_file)?;
        Ok(report)
    }
}
