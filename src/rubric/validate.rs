//! Artifact validation against the grading rubric.
//!
//! [`validate`] is a pure function of (file path, rubric) and never
//! returns an error to the caller: missing files, YAML parse failures,
//! and malformed structure all become a failed [`ValidationResult`]
//! carrying the first-failure message. Checks run in a fixed order and
//! short-circuit, so `assertions_passed` records exactly how far the
//! artifact got.
//!
//! The artifact is walked as a [`serde_yaml::Value`] rather than
//! deserialized into a rigid struct: agent-produced files can be
//! malformed in arbitrary ways, and each check wants to report its own
//! message for the piece it found missing.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_yaml::Value;

use super::normalize::normalize_metric_type;
use super::{Rubric, DISALLOWED_TYPE_SUBSTRINGS, MODEL_NAME_VARIANTS};

/// Structured outcome of grading one artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// True iff every rubric check succeeded.
    pub passed: bool,
    /// Checks satisfied before the first failure (all, if passed).
    pub assertions_passed: u32,
    /// Fixed expected check count for the rubric used.
    pub assertions_total: u32,
    /// Metric entries found in the artifact (0 if the structure is missing).
    pub metrics_count: usize,
    /// Sorted unique normalized benchmark identifiers that matched the
    /// expected set.
    pub benchmarks_found: Vec<String>,
    /// Description of the first failing check, `None` if passed.
    pub error_message: Option<String>,
}

/// Running assertion tally while the rule chain executes.
struct Tally {
    assertions_passed: u32,
    assertions_total: u32,
    metrics_count: usize,
    benchmarks_found: Vec<String>,
}

impl Tally {
    fn new(assertions_total: u32) -> Self {
        Tally {
            assertions_passed: 0,
            assertions_total,
            metrics_count: 0,
            benchmarks_found: Vec::new(),
        }
    }

    fn pass(&mut self) {
        self.assertions_passed += 1;
    }

    fn fail(self, message: String) -> ValidationResult {
        ValidationResult {
            passed: false,
            assertions_passed: self.assertions_passed,
            assertions_total: self.assertions_total,
            metrics_count: self.metrics_count,
            benchmarks_found: self.benchmarks_found,
            error_message: Some(message),
        }
    }

    fn finish(self) -> ValidationResult {
        ValidationResult {
            passed: true,
            assertions_passed: self.assertions_passed,
            assertions_total: self.assertions_total,
            metrics_count: self.metrics_count,
            benchmarks_found: self.benchmarks_found,
            error_message: None,
        }
    }
}

/// Validate an artifact with the default rubric.
pub fn validate_with_defaults(path: &Path) -> ValidationResult {
    validate(path, &Rubric::default())
}

/// Validate an evaluation YAML artifact and return structured metrics.
///
/// Read-only and stateless; safe to call repeatedly and from concurrent
/// callers on different files.
pub fn validate(path: &Path, rubric: &Rubric) -> ValidationResult {
    let mut tally = Tally::new(rubric.assertions_total());

    // 1. File exists
    if !path.exists() {
        return tally.fail(format!("Output file '{}' not found", path.display()));
    }
    tally.pass();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => return tally.fail(format!("Failed to read '{}': {}", path.display(), e)),
    };
    let doc: Value = match serde_yaml::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => return tally.fail(format!("Invalid YAML: {}", e)),
    };

    // 2. Non-empty model-index list
    let entries = match doc.get("model-index").and_then(Value::as_sequence) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return tally.fail("Missing or empty 'model-index' key".to_string()),
    };
    tally.pass();
    let entry = &entries[0];

    // 3. Model name names an OLMo 7B variant
    let name = entry.get("name").and_then(Value::as_str).unwrap_or_default();
    let lowered = name.to_lowercase();
    if !MODEL_NAME_VARIANTS.iter().any(|v| lowered.contains(v)) {
        return tally.fail(format!(
            "Model name is '{}', expected an OLMo 7B variant",
            name
        ));
    }
    tally.pass();

    // 4. Non-empty results list
    let results = match entry.get("results").and_then(Value::as_sequence) {
        Some(results) if !results.is_empty() => results,
        _ => return tally.fail("Missing or empty 'results' key".to_string()),
    };
    tally.pass();
    let result = &results[0];

    // 5. Task type
    let task_type = result
        .get("task")
        .and_then(|task| task.get("type"))
        .and_then(Value::as_str);
    if task_type != Some("text-generation") {
        return tally.fail(format!(
            "Task type is '{}', expected 'text-generation'",
            task_type.unwrap_or_default()
        ));
    }
    tally.pass();

    // 6. Non-empty metrics list; count recorded regardless of later outcome
    let metrics = match result.get("metrics").and_then(Value::as_sequence) {
        Some(metrics) if !metrics.is_empty() => metrics,
        _ => return tally.fail("Missing or empty 'metrics' key".to_string()),
    };
    tally.metrics_count = metrics.len();
    tally.pass();

    // 7. At least as many metrics as the ground-truth table
    if metrics.len() < rubric.expected_metrics.len() {
        return tally.fail(format!(
            "Found {} metrics, expected at least {}",
            metrics.len(),
            rubric.expected_metrics.len()
        ));
    }
    tally.pass();

    // 8. Benchmark coverage over normalized metric types
    let normalized_types: Vec<String> = metrics
        .iter()
        .map(|m| normalize_metric_type(m.get("type").and_then(Value::as_str).unwrap_or_default()))
        .collect();

    let found: BTreeSet<&str> = normalized_types
        .iter()
        .map(String::as_str)
        .filter(|t| rubric.expected_benchmarks.contains(*t))
        .collect();
    tally.benchmarks_found = found.iter().map(|t| t.to_string()).collect();
    if found.len() < rubric.min_expected_benchmarks {
        let listed = tally.benchmarks_found.join(", ");
        return tally.fail(format!(
            "Only found {} expected benchmarks: {}",
            found.len(),
            listed
        ));
    }
    tally.pass();

    // 9. No hyperparameter or architecture fields among the metric types
    let unwanted: BTreeSet<&str> = normalized_types
        .iter()
        .map(String::as_str)
        .filter(|t| DISALLOWED_TYPE_SUBSTRINGS.iter().any(|u| t.contains(u)))
        .collect();
    if !unwanted.is_empty() {
        let listed: Vec<&str> = unwanted.into_iter().collect();
        return tally.fail(format!("Found unwanted metric types: {}", listed.join(", ")));
    }
    tally.pass();

    // 10. No random-baseline rows
    for metric in metrics {
        let metric_name = metric.get("name").and_then(Value::as_str).unwrap_or_default();
        if metric_name.to_lowercase().contains("random") {
            return tally.fail(format!("Found random baseline: {}", metric_name));
        }
    }
    tally.pass();

    // 11. Every metric has a numeric value strictly greater than zero
    for metric in metrics {
        let metric_name = metric.get("name").and_then(Value::as_str).unwrap_or_default();
        match metric.get("value") {
            None => return tally.fail(format!("Metric '{}' missing value", metric_name)),
            Some(value) => match value.as_f64() {
                None => {
                    return tally.fail(format!("Metric '{}' value is not numeric", metric_name))
                }
                Some(v) if v <= 0.0 => {
                    return tally.fail(format!("Metric '{}' has invalid value: {}", metric_name, v))
                }
                Some(_) => {}
            },
        }
    }
    tally.pass();

    // 12..: Exact score match for each ground-truth benchmark, in table
    // order. Later duplicates of a normalized type overwrite earlier ones.
    let mut scores: BTreeMap<&str, f64> = BTreeMap::new();
    for (normalized, metric) in normalized_types.iter().zip(metrics) {
        if let Some(v) = metric.get("value").and_then(Value::as_f64) {
            scores.insert(normalized.as_str(), v);
        }
    }
    for (benchmark, expected) in &rubric.expected_metrics {
        match scores.get(benchmark.as_str()) {
            None => {
                return tally.fail(format!("Missing expected benchmark '{}'", benchmark));
            }
            Some(actual) if *actual != *expected => {
                return tally.fail(format!(
                    "Benchmark '{}' has value {}, expected {}",
                    benchmark, actual, expected
                ));
            }
            Some(_) => tally.pass(),
        }
    }

    // Final: source attribution cites the model card
    let url = result
        .get("source")
        .and_then(|source| source.get("url"))
        .and_then(Value::as_str);
    match url {
        None => tally.fail("Missing source or source URL".to_string()),
        Some(url) if !url.contains(&rubric.expected_source) => {
            tally.fail(format!("Incorrect source URL: {}", url))
        }
        Some(_) => {
            tally.pass();
            tally.finish()
        }
    }
}
