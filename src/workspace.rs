//! Per-batch and per-run filesystem layout.
//!
//! Artifacts are grouped as `runs/<batch_id>/run_<n>/` with a `workspace/`
//! the agent runs in, plus staging folders for the skills repository.
//! Batch ids are local timestamps so folders sort chronologically.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::EvalError;

/// Prompt file describing the extraction task, staged into each workspace.
pub const PROMPT_FILE: &str = "build_olmo_yaml.md";

/// Repo-level agent instructions, staged alongside the prompt.
pub const AGENTS_FILE: &str = "AGENTS.md";

/// Default name of the artifact the agent is asked to produce.
pub const DEFAULT_OUTPUT_FILE: &str = "olmo_7b_evaluations.yaml";

/// Harness-owned files that must not be swept up as run artifacts.
const STRAY_EXCLUDE: &[&str] = &[
    "olmo-eval.toml",
    "fastagent.config.yaml",
    "fastagent.secrets.yaml",
];

/// Timestamped batch identifier, e.g. `2026_08_24_09_15`.
pub fn batch_id_now() -> String {
    Local::now().format("%Y_%m_%d_%H_%M").to_string()
}

/// Folder layout for a single run.
#[derive(Debug, Clone)]
pub struct RunLayout {
    pub run_folder: PathBuf,
    pub workspace: PathBuf,
    pub skills_repo: PathBuf,
    pub skills_filtered: PathBuf,
}

impl RunLayout {
    pub fn new(batch_folder: &Path, run_number: u32) -> Self {
        let run_folder = batch_folder.join(format!("run_{}", run_number));
        RunLayout {
            workspace: run_folder.join("workspace"),
            skills_repo: run_folder.join("skills_repo"),
            skills_filtered: run_folder.join("skills_filtered"),
            run_folder,
        }
    }

    /// Create the run folder and workspace (staging folders are created
    /// on demand by the skills step).
    pub fn create(&self) -> Result<(), EvalError> {
        fs::create_dir_all(&self.workspace).map_err(|e| EvalError::io("create workspace", e))
    }
}

/// Copy the prompt inputs the agent needs into the workspace.
pub fn copy_prompt_assets(source_dir: &Path, workspace: &Path) -> Result<(), EvalError> {
    for name in [PROMPT_FILE, AGENTS_FILE] {
        let source = source_dir.join(name);
        if !source.exists() {
            return Err(EvalError::Config(format!(
                "Prompt asset missing: {}",
                source.display()
            )));
        }
        fs::copy(&source, workspace.join(name))
            .map_err(|e| EvalError::io("copy prompt asset", e))?;
    }
    Ok(())
}

/// If the agent wrote the output file somewhere under the skills repo
/// clone instead of the workspace, copy the first match back.
pub fn recover_output_file(
    workspace: &Path,
    skills_repo: &Path,
    output_filename: &str,
) -> Result<(), EvalError> {
    let target = workspace.join(output_filename);
    if target.exists() {
        return Ok(());
    }

    if let Some(found) = find_file_recursive(skills_repo, output_filename) {
        info!(from = %found.display(), "recovering output file from skills repo");
        fs::copy(&found, &target).map_err(|e| EvalError::io("recover output file", e))?;
    }
    Ok(())
}

/// Sweep stray `*.yaml` / `*.py` artifacts the agent left in the harness
/// root into the run folder. Returns the moved file names.
pub fn collect_stray_artifacts(root: &Path, run_folder: &Path) -> Result<Vec<String>, EvalError> {
    let mut moved = Vec::new();
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => return Err(EvalError::io("read harness root", e)),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        let is_artifact = name.ends_with(".yaml") || name.ends_with(".py");
        if !is_artifact || STRAY_EXCLUDE.contains(&name.as_str()) {
            continue;
        }
        let dest = run_folder.join(&name);
        fs::rename(&path, &dest).map_err(|e| EvalError::io("collect stray artifact", e))?;
        moved.push(name);
    }

    Ok(moved)
}

/// Locate the YAML artifact for a recorded run.
///
/// Prefers the expected output name inside `workspace/`, then the run
/// folder itself, then falls back to the first `*.yaml` in either.
pub fn find_run_artifact(run_folder: &Path, output_filename: &str) -> Option<PathBuf> {
    let workspace = run_folder.join("workspace");

    for candidate in [workspace.join(output_filename), run_folder.join(output_filename)] {
        if candidate.exists() {
            return Some(candidate);
        }
    }

    for dir in [workspace, run_folder.to_path_buf()] {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        let mut yamls: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|ext| ext.to_str()) == Some("yaml"))
            .collect();
        yamls.sort();
        if let Some(first) = yamls.into_iter().next() {
            return Some(first);
        }
    }
    None
}

/// Depth-first search for a file by name.
pub fn find_file_recursive(dir: &Path, filename: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && path.file_name().and_then(|n| n.to_str()) == Some(filename) {
            return Some(path);
        }
        if path.is_dir() {
            subdirs.push(path);
        }
    }

    for subdir in subdirs {
        if let Some(found) = find_file_recursive(&subdir, filename) {
            return Some(found);
        }
    }
    None
}

/// Recursive directory copy, skipping directories named in `skip`.
pub fn copy_dir_recursive(src: &Path, dst: &Path, skip: &[&str]) -> Result<(), EvalError> {
    fs::create_dir_all(dst).map_err(|e| EvalError::io("create copy target", e))?;
    let entries = fs::read_dir(src).map_err(|e| EvalError::io("read copy source", e))?;

    for entry in entries.flatten() {
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if path.is_dir() {
            if skip.contains(&name.as_str()) {
                continue;
            }
            copy_dir_recursive(&path, &dst.join(&name), skip)?;
        } else {
            fs::copy(&path, dst.join(&name)).map_err(|e| EvalError::io("copy file", e))?;
        }
    }
    Ok(())
}
