//! Harness configuration.
//!
//! Defaults reproduce the standard batch setup; a TOML file (and the CLI
//! on top of it) can override any field. The validator itself takes no
//! configuration from here beyond what the `grade` command passes
//! through explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::skills::{SKILLS_REPO_COMMIT, SKILLS_REPO_URL};
use crate::workspace::DEFAULT_OUTPUT_FILE;
use crate::EvalError;

/// Default configuration file name, looked up in the harness root.
pub const CONFIG_FILE: &str = "olmo-eval.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Number of iterations per batch.
    pub runs: u32,
    /// Name of the YAML artifact the agent is asked to produce.
    pub output_file: String,
    /// Root folder for batch artifacts.
    pub runs_dir: PathBuf,
    /// Stable CSV accumulating results across batches.
    pub csv_path: PathBuf,
    /// Directory holding the prompt assets to stage into each workspace.
    pub prompt_dir: PathBuf,
    /// Agent framework CLI to launch per run.
    pub agent_command: String,
    /// Extra arguments passed to the agent command.
    pub agent_args: Vec<String>,
    /// Conversation report the framework leaves behind, relative to the
    /// workspace.
    pub agent_report_file: String,
    /// Model override forwarded to the agent command.
    pub model: Option<String>,
    /// Whether to stage the skills repository for each run.
    pub use_skills: bool,
    pub skills_repo_url: String,
    pub skills_repo_commit: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            runs: 1,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            runs_dir: PathBuf::from("runs"),
            csv_path: PathBuf::from("runs").join("results.csv"),
            prompt_dir: PathBuf::from("."),
            agent_command: "fast-agent".to_string(),
            agent_args: Vec::new(),
            agent_report_file: ".fast-agent/report.json".to_string(),
            model: None,
            use_skills: true,
            skills_repo_url: SKILLS_REPO_URL.to_string(),
            skills_repo_commit: SKILLS_REPO_COMMIT.to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let text = fs::read_to_string(path)
            .map_err(|e| EvalError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&text)
            .map_err(|e| EvalError::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Load the given file, or `olmo-eval.toml` if present, or defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, EvalError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
