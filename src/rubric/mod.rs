//! Grading rubric for the model-card extraction task.
//!
//! The rubric is fixed: one model card (OLMo-7B), one artifact shape
//! (Hugging Face `model-index` YAML), one ground-truth score table. The
//! validator in [`validate`] walks an ordered chain of checks and reports
//! the first failure; [`Rubric`] carries the small set of overridable
//! parameters with their documented defaults.

pub mod normalize;
pub mod validate;

pub use validate::{validate, validate_with_defaults, ValidationResult};

use std::collections::BTreeSet;

/// Ground-truth benchmark scores from the OLMo-7B model card README table.
///
/// Table order matters: the per-benchmark exact-value assertions run in
/// this order, so the first mismatch reported is deterministic.
pub const EXPECTED_METRICS: &[(&str, f64)] = &[
    ("arc_challenge", 48.5),
    ("arc_easy", 65.4),
    ("boolq", 73.4),
    ("copa", 90.0),
    ("hellaswag", 76.4),
    ("openbookqa", 50.2),
    ("piqa", 78.4),
    ("sciq", 93.8),
    ("winogrande", 67.9),
    ("mmlu", 28.3),
    ("truthfulqa", 36.0),
];

/// Training-hyperparameter and architecture fields that must not leak
/// into the metrics list.
pub const DISALLOWED_TYPE_SUBSTRINGS: &[&str] = &[
    "d_model",
    "num_heads",
    "num_layers",
    "batch_size",
    "peak_lr",
    "warmup_steps",
    "weight_decay",
    "beta1",
    "beta2",
    "epsilon",
    "sequence_length",
    "1b",
    "7b",
];

/// Canonical model-card URL fragment the artifact's source must cite.
pub const EXPECTED_SOURCE: &str = "huggingface.co/allenai/OLMo-7B";

/// Minimum number of expected benchmarks that must be covered.
pub const MIN_EXPECTED_BENCHMARKS: usize = 9;

/// Accepted spellings of the model name (matched case-insensitively as
/// substrings of the `model-index` entry name).
pub const MODEL_NAME_VARIANTS: &[&str] = &["olmo 7b", "olmo-7b"];

/// Number of assertions independent of the expected-metrics table size.
pub const BASE_ASSERTIONS: u32 = 12;

/// Total assertion count for the default rubric.
pub const ASSERTIONS_TOTAL: u32 = BASE_ASSERTIONS + EXPECTED_METRICS.len() as u32;

/// Overridable rubric parameters.
///
/// `Default` yields the fixed grading configuration used by the harness;
/// tests and the `grade` command can override individual fields.
#[derive(Debug, Clone)]
pub struct Rubric {
    /// Substring the result's source URL must contain.
    pub expected_source: String,
    /// Minimum expected-benchmark coverage.
    pub min_expected_benchmarks: usize,
    /// Benchmark identifiers counted toward coverage.
    pub expected_benchmarks: BTreeSet<String>,
    /// Ground-truth (benchmark, score) pairs checked for exact equality,
    /// in reporting order.
    pub expected_metrics: Vec<(String, f64)>,
}

impl Default for Rubric {
    fn default() -> Self {
        Rubric {
            expected_source: EXPECTED_SOURCE.to_string(),
            min_expected_benchmarks: MIN_EXPECTED_BENCHMARKS,
            expected_benchmarks: EXPECTED_METRICS
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            expected_metrics: EXPECTED_METRICS
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }
}

impl Rubric {
    /// Total number of assertions this rubric evaluates.
    pub fn assertions_total(&self) -> u32 {
        BASE_ASSERTIONS + self.expected_metrics.len() as u32
    }
}
