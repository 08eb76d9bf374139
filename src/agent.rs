//! Seam to the external agent framework.
//!
//! The conversation loop, tool dispatch, and token accounting all live in
//! a third-party agent CLI; this harness only needs to start a run and
//! read back a summary. [`Agent`] is that seam, and [`AgentReport`] is
//! the reporting interface the framework satisfies by leaving a JSON
//! summary file in the run workspace.
//!
//! # Graceful Degradation
//!
//! A missing or malformed report file degrades to zeroed metrics rather
//! than failing the run: the artifact can still be graded, and the CSV
//! row records whatever was recoverable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::EvalError;

/// Conversation summary reported by the agent framework after a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentReport {
    /// Model the framework resolved for the session.
    pub model: String,
    /// Cumulative billed tokens.
    pub tokens: u64,
    /// Wall-clock span of the conversation.
    pub conversation_span_ms: f64,
    /// Time attributed to LLM calls.
    pub llm_time_ms: f64,
    /// User-message turns.
    pub turns: u32,
    /// Tool name -> call count.
    pub tool_calls: BTreeMap<String, u32>,
    /// Tool name -> error count.
    pub tool_errors: BTreeMap<String, u32>,
    /// Session identifier assigned by the framework.
    pub session_id: String,
    /// Path to the persisted conversation history, if any.
    pub session_history_file: String,
}

impl AgentReport {
    /// Tool time is whatever is left in the wall-clock span after LLM time.
    pub fn tool_time_ms(&self) -> f64 {
        (self.conversation_span_ms - self.llm_time_ms).max(0.0)
    }

    pub fn total_tool_calls(&self) -> u32 {
        self.tool_calls.values().sum()
    }

    pub fn total_tool_errors(&self) -> u32 {
        self.tool_errors.values().sum()
    }
}

/// One run of the fixed extraction task in a prepared workspace.
pub trait Agent {
    /// Execute the task with `workspace` as the working directory and
    /// return the framework's conversation summary.
    fn run_task(&self, workspace: &Path) -> Result<AgentReport, EvalError>;
}

/// Agent implementation that shells out to the framework's CLI.
pub struct CommandAgent {
    program: String,
    args: Vec<String>,
    /// Report location relative to the workspace.
    report_file: PathBuf,
    model: Option<String>,
}

impl CommandAgent {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        report_file: impl Into<PathBuf>,
        model: Option<String>,
    ) -> Self {
        CommandAgent {
            program: program.into(),
            args,
            report_file: report_file.into(),
            model,
        }
    }

    fn load_report(&self, workspace: &Path) -> AgentReport {
        let path = workspace.join(&self.report_file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "agent report missing, using zeroed metrics");
                return AgentReport::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(report) => report,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "agent report unreadable, using zeroed metrics");
                AgentReport::default()
            }
        }
    }
}

impl Agent for CommandAgent {
    fn run_task(&self, workspace: &Path) -> Result<AgentReport, EvalError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(workspace);
        if let Some(model) = &self.model {
            command.arg("--model").arg(model);
        }

        debug!(program = %self.program, workspace = %workspace.display(), "launching agent");
        let status = command.status().map_err(|e| {
            EvalError::Agent(format!("failed to launch '{}': {}", self.program, e))
        })?;
        if !status.success() {
            // The run may still have produced a gradeable artifact; record
            // the exit status and continue.
            warn!(program = %self.program, status = %status, "agent exited with failure");
        }

        Ok(self.load_report(workspace))
    }
}
