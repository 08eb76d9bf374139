//! Run records and CSV persistence.
//!
//! One [`RunRecord`] per agent run, accumulating grading results and the
//! framework's conversation metrics, appended to a stable CSV so batches
//! can be compared across agent, skill, and model versions.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agent::AgentReport;
use crate::rubric::ValidationResult;
use crate::EvalError;

/// One CSV row. Field order is the column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    pub batch_id: String,
    pub run_number: u32,
    pub model: String,
    pub timestamp: String,
    pub passed: bool,
    pub assertions_passed: u32,
    pub assertions_total: u32,
    pub metrics_count: usize,
    /// Comma-joined sorted benchmark identifiers.
    pub benchmarks_found: String,
    pub tokens: u64,
    pub conversation_span_ms: f64,
    pub tool_calls: u32,
    pub tool_errors: u32,
    pub mcp_calls: u32,
    pub mcp_errors: u32,
    pub execute_calls: u32,
    pub execute_errors: u32,
    pub error_message: String,
    pub llm_time_ms: f64,
    pub tool_time_ms: f64,
    pub turns: u32,
    pub session_id: String,
    pub session_history_file: String,
}

impl RunRecord {
    /// Fresh record with run identity set and metrics zeroed.
    pub fn new(batch_id: &str, run_number: u32, assertions_total: u32, timestamp: String) -> Self {
        RunRecord {
            batch_id: batch_id.to_string(),
            run_number,
            assertions_total,
            timestamp,
            ..RunRecord::default()
        }
    }

    /// Fold a grading outcome into the record.
    pub fn apply_validation(&mut self, validation: &ValidationResult) {
        self.passed = validation.passed;
        self.assertions_passed = validation.assertions_passed;
        self.assertions_total = validation.assertions_total;
        self.metrics_count = validation.metrics_count;
        self.benchmarks_found = validation.benchmarks_found.join(",");
        self.error_message = validation.error_message.clone().unwrap_or_default();
    }

    /// Fold the agent framework's conversation summary into the record.
    pub fn apply_report(&mut self, report: &AgentReport) {
        self.model = report.model.clone();
        self.tokens = report.tokens;
        self.conversation_span_ms = report.conversation_span_ms;
        self.llm_time_ms = (report.llm_time_ms * 100.0).round() / 100.0;
        self.tool_time_ms = (report.tool_time_ms() * 100.0).round() / 100.0;
        self.turns = report.turns;
        self.tool_calls = report.total_tool_calls();
        self.tool_errors = report.total_tool_errors();
        self.session_id = report.session_id.clone();
        self.session_history_file = report.session_history_file.clone();

        let categories = categorize_tool_calls(&report.tool_calls, &report.tool_errors);
        self.mcp_calls = categories.mcp_calls;
        self.mcp_errors = categories.mcp_errors;
        self.execute_calls = categories.execute_calls;
        self.execute_errors = categories.execute_errors;
    }
}

/// Tool-call counts split by transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCategories {
    pub mcp_calls: u32,
    pub mcp_errors: u32,
    pub execute_calls: u32,
    pub execute_errors: u32,
}

/// Categorize tool calls and errors into MCP vs execute.
///
/// MCP tools follow the `server__tool` double-underscore convention;
/// execute/skill tools do not.
pub fn categorize_tool_calls(
    tool_calls: &BTreeMap<String, u32>,
    tool_errors: &BTreeMap<String, u32>,
) -> ToolCategories {
    let mut categories = ToolCategories::default();

    for (tool_name, count) in tool_calls {
        if tool_name.contains("__") {
            categories.mcp_calls += count;
        } else {
            categories.execute_calls += count;
        }
    }

    for (tool_name, count) in tool_errors {
        if tool_name.contains("__") {
            categories.mcp_errors += count;
        } else {
            categories.execute_errors += count;
        }
    }

    categories
}

/// Append-mode CSV writer for the results table.
///
/// The header is written only when the file is created, so batches
/// accumulate into one table.
pub struct ResultsCsv {
    writer: csv::Writer<std::fs::File>,
}

impl ResultsCsv {
    /// Open `path` for appending, creating parent directories and the
    /// header as needed.
    pub fn append(path: &Path) -> Result<Self, EvalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EvalError::io("create runs directory", e))?;
        }
        let exists = path.exists() && fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| EvalError::io("open results CSV", e))?;
        let writer = csv::WriterBuilder::new()
            .has_headers(!exists)
            .from_writer(file);
        Ok(ResultsCsv { writer })
    }

    /// Truncate `path` and start a fresh table with a header.
    pub fn create(path: &Path) -> Result<Self, EvalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EvalError::io("create runs directory", e))?;
        }
        let file = fs::File::create(path).map_err(|e| EvalError::io("create results CSV", e))?;
        let writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);
        Ok(ResultsCsv { writer })
    }

    /// Write one row and flush so partial batches are never lost.
    pub fn write(&mut self, record: &RunRecord) -> Result<(), EvalError> {
        self.writer.serialize(record)?;
        self.writer
            .flush()
            .map_err(|e| EvalError::io("flush results CSV", e))?;
        Ok(())
    }
}

/// Read all records from a results CSV.
pub fn read_records(path: &Path) -> Result<Vec<RunRecord>, EvalError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
