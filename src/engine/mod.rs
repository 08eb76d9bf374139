//! Batch execution engine.
//!
//! The runner drives one agent run at a time: stage the workspace and
//! skills, launch the agent, grade the artifact, and append a CSV row.
//! Per-run failures never abort the batch; they become rows with an
//! error message and zero assertion credit.

pub mod record;
pub mod runner;

pub use record::{categorize_tool_calls, read_records, ResultsCsv, RunRecord, ToolCategories};
pub use runner::{BatchOutcome, BatchRunner};
