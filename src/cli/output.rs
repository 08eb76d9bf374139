//! Terminal output formatting.
//!
//! Small, dependency-light formatting for grade results and batch
//! summaries. Color is plain ANSI and disabled via `--no-color` or the
//! `NO_COLOR` environment variable.

use crate::engine::BatchOutcome;
use crate::rubric::{Rubric, ValidationResult};

/// ANSI color helper.
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Painter { color }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.colorize(text, "32")
    }

    pub fn red(&self, text: &str) -> String {
        self.colorize(text, "31")
    }

    pub fn bold(&self, text: &str) -> String {
        self.colorize(text, "1")
    }
}

/// Human-readable label for each check, in chain order. One entry per
/// assertion the rubric evaluates.
fn check_labels(rubric: &Rubric) -> Vec<String> {
    let mut labels: Vec<String> = [
        "output file exists",
        "model-index list present",
        "model name names OLMo 7B",
        "results list present",
        "task type is text-generation",
        "metrics list present",
        "enough metric entries",
        "expected benchmark coverage",
        "no hyperparameter or architecture fields",
        "no random-baseline rows",
        "all values numeric and positive",
    ]
    .iter()
    .map(|label| label.to_string())
    .collect();
    for (benchmark, expected) in &rubric.expected_metrics {
        labels.push(format!("{} == {}", benchmark, expected));
    }
    labels.push("source cites the model card".to_string());
    labels
}

/// Format a grading outcome for the terminal, one line per check.
///
/// The chain short-circuits, so checks past the first failure are shown
/// as not evaluated.
pub fn format_validation(result: &ValidationResult, rubric: &Rubric, painter: &Painter) -> String {
    let mut out = String::new();

    let status = if result.passed {
        painter.green("PASSED")
    } else {
        painter.red("FAILED")
    };
    out.push_str(&format!(
        "{} ({}/{} assertions)\n",
        status, result.assertions_passed, result.assertions_total
    ));

    for (index, label) in check_labels(rubric).iter().enumerate() {
        let index = index as u32;
        if index < result.assertions_passed {
            out.push_str(&format!("  {} {}\n", painter.green("✓"), label));
        } else if index == result.assertions_passed && !result.passed {
            out.push_str(&format!("  {} {}\n", painter.red("✗"), label));
        } else {
            out.push_str(&format!("  - {} (not evaluated)\n", label));
        }
    }

    out.push_str(&format!("Metrics found: {}\n", result.metrics_count));
    if !result.benchmarks_found.is_empty() {
        out.push_str(&format!(
            "Benchmarks: {}\n",
            result.benchmarks_found.join(", ")
        ));
    }
    if let Some(message) = &result.error_message {
        out.push_str(&format!("Error: {}\n", message));
    }

    out
}

/// Format the end-of-batch summary block.
pub fn format_batch_summary(outcome: &BatchOutcome, painter: &Painter) -> String {
    let total = outcome.records.len();
    let passed = outcome.passed_count();
    let line = "=".repeat(60);

    let passed_text = format!("{}/{}", passed, total);
    let passed_text = if passed == total && total > 0 {
        painter.green(&passed_text)
    } else {
        painter.red(&passed_text)
    };

    format!(
        "{line}\n{}\nPassed: {}\nBatch ID: {}\nArtifacts: {}\nResults CSV: {}\n{line}",
        painter.bold("BATCH COMPLETE"),
        passed_text,
        outcome.batch_id,
        outcome.batch_folder.display(),
        outcome.csv_path.display(),
    )
}
