//! olmo-eval library
//!
//! Evaluation harness for a fixed agent task: extract benchmark scores
//! from the OLMo-7B model card into a `model-index` YAML file. The
//! harness repeatedly drives an external LLM agent through that task,
//! grades each run's artifact against a deterministic rubric, and
//! appends a metrics row (pass/fail, assertion counts, timing, token
//! usage, tool-call counts) to a CSV for comparison across agent, skill,
//! and model versions.
//!
//! The grading core is [`rubric::validate`]: a pure function from a file
//! path and a [`rubric::Rubric`] to a [`rubric::ValidationResult`]. The
//! agent framework itself is external and reached through the
//! [`agent::Agent`] seam.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use olmo_eval::rubric::validate_with_defaults;
//!
//! let result = validate_with_defaults(Path::new("olmo_7b_evaluations.yaml"));
//! println!(
//!     "passed: {} ({}/{} assertions)",
//!     result.passed, result.assertions_passed, result.assertions_total
//! );
//! ```

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod rubric;
pub mod skills;
pub mod version;
pub mod workspace;

use thiserror::Error;

// Re-exports for the public API
pub use agent::{Agent, AgentReport};
pub use config::HarnessConfig;
pub use engine::{BatchOutcome, BatchRunner, RunRecord};
pub use rubric::{validate, validate_with_defaults, Rubric, ValidationResult};

/// Error type for harness operations.
///
/// The validator never produces these; grading failures are data, not
/// errors. These cover the orchestration around it.
#[derive(Debug, Error)]
pub enum EvalError {
    /// I/O failure with the operation it interrupted
    #[error("I/O error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Skills repository cloning or manifest discovery failure
    #[error("Skills repo error: {0}")]
    SkillRepo(String),
    /// Agent launch or reporting failure
    #[error("Agent error: {0}")]
    Agent(String),
    /// Results CSV read/write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl EvalError {
    /// I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        EvalError::Io {
            context: context.into(),
            source,
        }
    }
}
