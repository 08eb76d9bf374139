//! Rubric validation tests.
//!
//! Each test plants a YAML artifact in a temp directory and checks the
//! validator's verdict, the short-circuit assertion count, and the
//! first-failure message.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use olmo_eval::rubric::{validate, validate_with_defaults, Rubric, ASSERTIONS_TOTAL};

use crate::mocks::{artifact_with_metrics, ground_truth_metrics, passing_artifact_yaml};

fn write_artifact(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("olmo_7b_evaluations.yaml");
    fs::write(&path, content).unwrap();
    path
}

fn metric_rows(rows: &[(&str, &str, f64)]) -> Vec<(String, String, f64)> {
    rows.iter()
        .map(|(name, metric_type, value)| (name.to_string(), metric_type.to_string(), *value))
        .collect()
}

#[test]
fn complete_artifact_passes_all_assertions() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &passing_artifact_yaml());

    let result = validate_with_defaults(&path);

    assert!(result.passed, "unexpected failure: {:?}", result.error_message);
    assert_eq!(result.assertions_passed, ASSERTIONS_TOTAL);
    assert_eq!(result.assertions_total, ASSERTIONS_TOTAL);
    assert_eq!(result.metrics_count, 11);
    assert_eq!(
        result.benchmarks_found,
        vec![
            "arc_challenge",
            "arc_easy",
            "boolq",
            "copa",
            "hellaswag",
            "mmlu",
            "openbookqa",
            "piqa",
            "sciq",
            "truthfulqa",
            "winogrande",
        ]
    );
    assert_eq!(result.error_message, None);
}

#[test]
fn validation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &passing_artifact_yaml());

    let first = validate_with_defaults(&path);
    let second = validate_with_defaults(&path);
    assert_eq!(first, second);
}

#[test]
fn missing_file_fails_with_zero_assertions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("olmo_7b_evaluations.yaml");

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 0);
    assert_eq!(result.assertions_total, ASSERTIONS_TOTAL);
    assert_eq!(result.metrics_count, 0);
    assert!(result.benchmarks_found.is_empty());
    assert!(result.error_message.unwrap().contains("not found"));
}

#[test]
fn malformed_yaml_credits_only_file_existence() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, "model-index: [unclosed");

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 1);
    assert!(result.error_message.unwrap().contains("Invalid YAML"));
}

#[test]
fn empty_model_index_fails_second_assertion() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, "model-index: []\n");

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 1);
    assert!(result.error_message.unwrap().contains("model-index"));
}

#[test]
fn wrong_model_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let artifact = passing_artifact_yaml().replace("- name: OLMo-7B", "- name: OLMo-1B");
    let path = write_artifact(&dir, &artifact);

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 2);
    assert!(result.error_message.unwrap().contains("OLMo-1B"));
}

#[test]
fn model_name_matches_as_case_insensitive_substring() {
    let dir = TempDir::new().unwrap();
    let artifact =
        passing_artifact_yaml().replace("- name: OLMo-7B", "- name: allenai/olmo-7b-hf");
    let path = write_artifact(&dir, &artifact);

    let result = validate_with_defaults(&path);
    assert!(result.passed);
}

#[test]
fn wrong_task_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    let artifact = passing_artifact_yaml()
        .replace("type: text-generation", "type: question-answering");
    let path = write_artifact(&dir, &artifact);

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 4);
    assert!(result.error_message.unwrap().contains("question-answering"));
}

#[test]
fn dropped_benchmark_fails_metric_count() {
    let dir = TempDir::new().unwrap();
    let mut metrics = ground_truth_metrics();
    metrics.retain(|(name, _, _)| name != "sciq");
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 6);
    assert_eq!(result.metrics_count, 10);
    assert!(result
        .error_message
        .unwrap()
        .contains("Found 10 metrics, expected at least 11"));
}

#[test]
fn hyperparameter_rows_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut metrics = ground_truth_metrics();
    metrics.push(("d_model".to_string(), "d_model".to_string(), 4096.0));
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 8);
    assert_eq!(result.metrics_count, 12);
    assert!(result.error_message.unwrap().contains("d_model"));
}

#[test]
fn random_baseline_rows_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut metrics = ground_truth_metrics();
    metrics.push((
        "arc_challenge (random)".to_string(),
        "arc_challenge".to_string(),
        25.0,
    ));
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 9);
    assert!(result.error_message.unwrap().contains("arc_challenge (random)"));
}

#[test]
fn zero_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    let metrics: Vec<_> = ground_truth_metrics()
        .into_iter()
        .map(|(name, metric_type, value)| {
            if name == "hellaswag" {
                (name, metric_type, 0.0)
            } else {
                (name, metric_type, value)
            }
        })
        .collect();
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 10);
    assert!(result.error_message.unwrap().contains("hellaswag"));
}

#[test]
fn non_numeric_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    let artifact = passing_artifact_yaml().replace("value: 76.4", "value: n/a");
    let path = write_artifact(&dir, &artifact);

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 10);
    assert!(result.error_message.unwrap().contains("not numeric"));
}

#[test]
fn first_score_mismatch_is_reported_in_table_order() {
    let dir = TempDir::new().unwrap();
    let artifact = passing_artifact_yaml().replace("value: 48.5", "value: 48.6");
    let path = write_artifact(&dir, &artifact);

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 11);
    let message = result.error_message.unwrap();
    assert!(message.contains("arc_challenge"));
    assert!(message.contains("48.6"));
    assert!(message.contains("48.5"));
}

#[test]
fn duplicate_benchmark_types_take_the_last_value() {
    let dir = TempDir::new().unwrap();
    let mut metrics = ground_truth_metrics();
    metrics.push((
        "arc_challenge_rerun".to_string(),
        "arc_challenge".to_string(),
        10.0,
    ));
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 11);
    let message = result.error_message.unwrap();
    assert!(message.contains("arc_challenge"));
    assert!(message.contains("10"));
}

#[test]
fn card_display_names_normalize_to_canonical_benchmarks() {
    let dir = TempDir::new().unwrap();
    let metrics = metric_rows(&[
        ("ARC Challenge", "ARC Challenge", 48.5),
        ("ARC Easy", "ARC Easy", 65.4),
        ("BoolQ", "BoolQ", 73.4),
        ("COPA", "COPA", 90.0),
        ("HellaSwag", "HellaSwag", 76.4),
        ("OpenBookQA", "OpenBookQA", 50.2),
        ("PIQA", "PIQA", 78.4),
        ("SciQ", "SciQ", 93.8),
        ("Winogrande", "Winogrande", 67.9),
        ("MMLU (5 shot MC)", "MMLU (5 shot MC)", 28.3),
        ("truthfulQA (MC2)", "truthfulQA (MC2)", 36.0),
    ]);
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let result = validate_with_defaults(&path);

    assert!(result.passed, "unexpected failure: {:?}", result.error_message);
    assert_eq!(result.assertions_passed, ASSERTIONS_TOTAL);
}

#[test]
fn missing_source_fails_the_final_assertion() {
    let dir = TempDir::new().unwrap();
    let artifact = passing_artifact_yaml();
    let truncated = artifact[..artifact.find("    source:").unwrap()].to_string();
    let path = write_artifact(&dir, &truncated);

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, ASSERTIONS_TOTAL - 1);
    assert!(result.error_message.unwrap().contains("source"));
}

#[test]
fn wrong_source_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let artifact = passing_artifact_yaml().replace("allenai/OLMo-7B", "allenai/OLMo-1B");
    let path = write_artifact(&dir, &artifact);

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, ASSERTIONS_TOTAL - 1);
    assert!(result.error_message.unwrap().contains("Incorrect source URL"));
}

#[test]
fn partial_coverage_still_fails_exact_score_checks() {
    // Replace two benchmark types with local suite names: coverage drops
    // to 9, which meets the minimum, but the exact-score pass over the
    // ground-truth table still notices the missing benchmark.
    let dir = TempDir::new().unwrap();
    let metrics: Vec<_> = ground_truth_metrics()
        .into_iter()
        .map(|(name, metric_type, value)| match name.as_str() {
            "boolq" => (name, "local_suite_a".to_string(), value),
            "sciq" => (name, "local_suite_b".to_string(), value),
            _ => (name, metric_type, value),
        })
        .collect();
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let result = validate_with_defaults(&path);

    assert!(!result.passed);
    assert_eq!(result.benchmarks_found.len(), 9);
    // arc_challenge and arc_easy pass their exact checks before boolq is
    // found missing.
    assert_eq!(result.assertions_passed, 13);
    assert!(result
        .error_message
        .unwrap()
        .contains("Missing expected benchmark 'boolq'"));
}

#[test]
fn stricter_coverage_minimum_fails_earlier() {
    let dir = TempDir::new().unwrap();
    let metrics: Vec<_> = ground_truth_metrics()
        .into_iter()
        .map(|(name, metric_type, value)| match name.as_str() {
            "boolq" => (name, "local_suite_a".to_string(), value),
            "sciq" => (name, "local_suite_b".to_string(), value),
            _ => (name, metric_type, value),
        })
        .collect();
    let path = write_artifact(&dir, &artifact_with_metrics(&metrics));

    let mut rubric = Rubric::default();
    rubric.min_expected_benchmarks = 10;
    let result = validate(&path, &rubric);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, 7);
    assert!(result.error_message.unwrap().contains("Only found 9"));
}

#[test]
fn custom_source_override_is_honored() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &passing_artifact_yaml());

    let mut rubric = Rubric::default();
    rubric.expected_source = "example.org/other-model".to_string();
    let result = validate(&path, &rubric);

    assert!(!result.passed);
    assert_eq!(result.assertions_passed, rubric.assertions_total() - 1);
    assert!(result.error_message.unwrap().contains("Incorrect source URL"));
}
